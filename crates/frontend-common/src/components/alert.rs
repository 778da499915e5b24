//! Inline error and confirmation banners

use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
    Info,
}

impl AlertKind {
    fn classes(self) -> &'static str {
        match self {
            Self::Error => "bg-red-50 border-red-200 text-red-700",
            Self::Success => "bg-green-50 border-green-200 text-green-700",
            Self::Info => "bg-blue-50 border-blue-200 text-blue-700",
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct AlertProps {
    pub kind: AlertKind,
    /// Nothing is rendered without a message
    #[prop_or_default]
    pub message: Option<String>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    let Some(message) = props.message.as_ref() else {
        return html! {};
    };

    let dismiss = props.on_dismiss.clone().map(|on_dismiss| {
        let onclick = Callback::from(move |_: MouseEvent| on_dismiss.emit(()));
        html! {
            <button {onclick} class="ml-4 text-sm font-medium underline">{"Dismiss"}</button>
        }
    });

    html! {
        <div class={classes!("mb-4", "p-4", "border", "rounded-md", "flex", "justify-between", props.kind.classes())}>
            <p class="m-0">{message}</p>
            {dismiss}
        </div>
    }
}
