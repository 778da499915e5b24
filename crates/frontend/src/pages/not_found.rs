use evcharge_frontend_common::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="min-h-screen flex flex-col items-center justify-center gap-4">
            <h1 class="text-4xl font-bold text-gray-900">{"404"}</h1>
            <p class="text-gray-600">{"This page does not exist."}</p>
            <Link<Route> to={Route::Root} classes="text-emerald-600 underline">{"Go home"}</Link<Route>>
        </div>
    }
}
