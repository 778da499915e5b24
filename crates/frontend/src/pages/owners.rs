//! EV owner accounts

use crate::layout::StaffShell;
use evcharge_frontend_common::client::owner_service;
use evcharge_frontend_common::{Alert, AlertKind, Spinner, describe_error};
use evcharge_http::types::EvOwner;
use yew::prelude::*;

#[function_component(OwnersPage)]
pub fn owners_page() -> Html {
    let owners = use_state(Vec::<EvOwner>::new);
    let is_loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let success = use_state(|| Option::<String>::None);

    let reload = {
        let owners = owners.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        Callback::from(move |()| {
            let owners = owners.clone();
            let is_loading = is_loading.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match owner_service() {
                    Ok(service) => service.list().await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(loaded) => owners.set(loaded),
                    Err(err) => error.set(describe_error(&err)),
                }
                is_loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| reload.emit(()));
    }

    let on_toggle = {
        let error = error.clone();
        let success = success.clone();
        Callback::from(move |(nic, active): (String, bool)| {
            let error = error.clone();
            let success = success.clone();
            let reload = reload.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match owner_service() {
                    Ok(service) => service.set_active(&nic, active).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(owner) => {
                        let state = if owner.is_active { "reactivated" } else { "deactivated" };
                        success.set(Some(format!("{} {state}", owner.full_name())));
                        reload.emit(());
                    }
                    Err(err) => error.set(describe_error(&err)),
                }
            });
        })
    };

    html! {
        <StaffShell title="EV Owners">
            <Alert kind={AlertKind::Error} message={(*error).clone()} />
            <Alert kind={AlertKind::Success} message={(*success).clone()} />
            if *is_loading {
                <Spinner text={"Loading EV owners..."} />
            } else {
                <table class="min-w-full bg-white rounded-lg shadow">
                    <thead>
                        <tr class="text-left text-sm text-gray-500">
                            <th class="p-3">{"NIC"}</th>
                            <th class="p-3">{"Name"}</th>
                            <th class="p-3">{"Email"}</th>
                            <th class="p-3">{"Phone"}</th>
                            <th class="p-3">{"Status"}</th>
                            <th class="p-3"></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for owners.iter().map(|owner| {
                            let nic = owner.nic.clone();
                            let active = !owner.is_active;
                            let on_toggle = on_toggle.clone();
                            let onclick = Callback::from(move |_: MouseEvent| on_toggle.emit((nic.clone(), active)));
                            html! {
                                <tr class="border-t">
                                    <td class="p-3 font-mono">{owner.nic.clone()}</td>
                                    <td class="p-3">{owner.full_name()}</td>
                                    <td class="p-3">{owner.email.clone()}</td>
                                    <td class="p-3">{owner.phone.clone().unwrap_or_default()}</td>
                                    <td class="p-3">{ if owner.is_active { "Active" } else { "Deactivated" } }</td>
                                    <td class="p-3">
                                        <button {onclick} class="text-sm underline">
                                            { if owner.is_active { "Deactivate" } else { "Reactivate" } }
                                        </button>
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            }
        </StaffShell>
    }
}
