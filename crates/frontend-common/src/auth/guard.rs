//! Route guard component

use super::context::use_auth;
use crate::components::Spinner;
use crate::routes::Route;
use evcharge_core::guard::{self, GuardDecision};
use evcharge_core::AppRoute;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GuardedProps {
    /// The view being navigated to
    pub route: AppRoute,
    pub children: Children,
}

/// Renders its children only when the guards for `route` pass.
///
/// While the session is still being resolved a spinner is shown, so a
/// signed-in user never sees a redirect flash on page load.
#[function_component(Guarded)]
pub fn guarded(props: &GuardedProps) -> Html {
    let auth = use_auth();

    match guard::evaluate(&props.route, &auth.session) {
        GuardDecision::Pending => html! {
            <div class="flex items-center justify-center min-h-screen">
                <Spinner text={"Checking session..."} />
            </div>
        },
        GuardDecision::Render => html! { <>{ props.children.clone() }</> },
        GuardDecision::Redirect(target) => html! {
            <Redirect<Route> to={Route::from(target)} />
        },
    }
}
