//! Page chrome for the console and the portal

use evcharge_core::{AppRoute, Role};
use evcharge_frontend_common::auth::use_current_user;
use evcharge_frontend_common::{Route, api_client};
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ShellProps {
    pub title: AttrValue,
    pub children: Children,
}

fn sign_out() -> Callback<MouseEvent> {
    Callback::from(|_| {
        wasm_bindgen_futures::spawn_local(async {
            match api_client() {
                Ok(client) => {
                    if let Err(err) = client.logout().await {
                        warn!("Sign out failed: {err}");
                    }
                }
                Err(err) => warn!("Sign out failed: {err}"),
            }
        });
    })
}

/// Links shown in the console navigation for `role`
fn staff_links(role: Role) -> Vec<(Route, &'static str)> {
    let mut links = vec![(Route::from(AppRoute::landing(role)), "Dashboard")];
    links.push((Route::Stations, "Stations"));
    links.push((Route::EvOwners, "EV Owners"));
    links.push((Route::Bookings, "Bookings"));
    if role == Role::Admin {
        links.push((Route::Users, "Users"));
    }
    links
}

#[function_component(StaffShell)]
pub fn staff_shell(props: &ShellProps) -> Html {
    let user = use_current_user();
    let links = user.as_ref().map(|user| staff_links(user.role)).unwrap_or_default();

    html! {
        <div class="min-h-screen bg-gray-50">
            <nav class="bg-white border-b border-gray-200">
                <div class="max-w-7xl mx-auto px-4 flex justify-between h-16 items-center">
                    <div class="flex items-center gap-6">
                        <span class="text-xl font-bold text-emerald-600">{"EV Charge"}</span>
                        { for links.into_iter().map(|(route, label)| html! {
                            <Link<Route> to={route} classes="text-sm text-gray-600 hover:text-gray-900">{label}</Link<Route>>
                        }) }
                    </div>
                    <div class="flex items-center gap-4">
                        if let Some(user) = &user {
                            <span class="text-sm text-gray-600">{format!("{} ({})", user.name, user.role)}</span>
                        }
                        <button onclick={sign_out()} class="text-sm text-gray-600 hover:text-gray-900">{"Sign Out"}</button>
                    </div>
                </div>
            </nav>
            <main class="p-6 max-w-7xl mx-auto">
                <h1 class="text-2xl font-bold text-gray-900 mb-6">{props.title.clone()}</h1>
                {props.children.clone()}
            </main>
        </div>
    }
}

#[function_component(PortalShell)]
pub fn portal_shell(props: &ShellProps) -> Html {
    let user = use_current_user();

    html! {
        <div class="min-h-screen bg-gray-50">
            <nav class="bg-emerald-600 text-white">
                <div class="max-w-5xl mx-auto px-4 flex justify-between h-16 items-center">
                    <div class="flex items-center gap-6">
                        <Link<Route> to={Route::PortalHome} classes="text-xl font-bold">{"EV Charge"}</Link<Route>>
                        <Link<Route> to={Route::PortalBookings} classes="text-sm">{"My Bookings"}</Link<Route>>
                        <Link<Route> to={Route::PortalNewBooking} classes="text-sm">{"Book a Slot"}</Link<Route>>
                    </div>
                    <div class="flex items-center gap-4">
                        if let Some(user) = &user {
                            <span class="text-sm">{user.name.clone()}</span>
                        }
                        <button onclick={sign_out()} class="text-sm underline">{"Sign Out"}</button>
                    </div>
                </div>
            </nav>
            <main class="p-6 max-w-5xl mx-auto">
                <h1 class="text-2xl font-bold text-gray-900 mb-6">{props.title.clone()}</h1>
                {props.children.clone()}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_admins_see_user_management() {
        let admin: Vec<_> = staff_links(Role::Admin).into_iter().map(|(r, _)| r).collect();
        let operator: Vec<_> = staff_links(Role::Operator).into_iter().map(|(r, _)| r).collect();

        assert!(admin.contains(&Route::Users));
        assert!(!operator.contains(&Route::Users));
        assert_eq!(operator[0], Route::OperatorDashboard);
    }
}
