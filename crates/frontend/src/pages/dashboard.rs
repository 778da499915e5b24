//! Console landing page for admins and operators

use crate::layout::StaffShell;
use evcharge_core::Role;
use evcharge_frontend_common::auth::use_current_user;
use evcharge_frontend_common::client::dashboard_service;
use evcharge_frontend_common::{Alert, AlertKind, Spinner, describe_error};
use evcharge_http::types::DashboardStats;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct StatCardProps {
    label: AttrValue,
    value: u32,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-white rounded-lg shadow p-6">
            <p class="text-sm text-gray-500">{props.label.clone()}</p>
            <p class="mt-2 text-3xl font-bold text-gray-900">{props.value}</p>
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let user = use_current_user();
    let stats = use_state(|| Option::<DashboardStats>::None);
    let error = use_state(|| Option::<String>::None);

    {
        let stats = stats.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = match dashboard_service() {
                    Ok(service) => service.stats().await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(loaded) => stats.set(Some(loaded)),
                    Err(err) => error.set(describe_error(&err)),
                }
            });
        });
    }

    let title = match user.map(|user| user.role) {
        Some(Role::Admin) => "Administrator Dashboard",
        _ => "Operator Dashboard",
    };

    html! {
        <StaffShell {title}>
            <Alert kind={AlertKind::Error} message={(*error).clone()} />
            {
                match stats.as_ref() {
                    Some(stats) => html! {
                        <div class="grid grid-cols-1 gap-6 sm:grid-cols-2 lg:grid-cols-3">
                            <StatCard label="Stations" value={stats.total_stations} />
                            <StatCard label="Active stations" value={stats.active_stations} />
                            <StatCard label="EV owners" value={stats.total_owners} />
                            <StatCard label="Pending bookings" value={stats.pending_bookings} />
                            <StatCard label="Approved bookings" value={stats.approved_bookings} />
                        </div>
                    },
                    None if error.is_none() => html! { <Spinner text={"Loading statistics..."} /> },
                    None => html! {},
                }
            }
        </StaffShell>
    }
}
