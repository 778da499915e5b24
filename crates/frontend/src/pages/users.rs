//! Back office accounts (admins only)

use crate::layout::StaffShell;
use evcharge_frontend_common::client::user_service;
use evcharge_frontend_common::{Alert, AlertKind, Spinner, describe_error};
use evcharge_http::types::StaffUser;
use yew::prelude::*;

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let users = use_state(Vec::<StaffUser>::new);
    let is_loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    let reload = {
        let users = users.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        Callback::from(move |()| {
            let users = users.clone();
            let is_loading = is_loading.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match user_service() {
                    Ok(service) => service.list().await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(loaded) => users.set(loaded),
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
        Callback::from(move |(id, active): (String, bool)| {
            let error = error.clone();
            let reload = reload.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match user_service() {
                    Ok(service) => service.set_active(&id, active).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(_) => reload.emit(()),
                    Err(err) => error.set(describe_error(&err)),
                }
            });
        })
    };

    html! {
        <StaffShell title="User Management">
            <Alert kind={AlertKind::Error} message={(*error).clone()} />
            if *is_loading {
                <Spinner text={"Loading users..."} />
            } else {
                <table class="min-w-full bg-white rounded-lg shadow">
                    <thead>
                        <tr class="text-left text-sm text-gray-500">
                            <th class="p-3">{"Username"}</th>
                            <th class="p-3">{"Email"}</th>
                            <th class="p-3">{"Role"}</th>
                            <th class="p-3">{"Status"}</th>
                            <th class="p-3"></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for users.iter().map(|user| {
                            let id = user.id.clone();
                            let active = !user.is_active;
                            let on_toggle = on_toggle.clone();
                            let onclick = Callback::from(move |_: MouseEvent| on_toggle.emit((id.clone(), active)));
                            html! {
                                <tr class="border-t">
                                    <td class="p-3">{user.username.clone()}</td>
                                    <td class="p-3">{user.email.clone()}</td>
                                    <td class="p-3">{user.role.to_string()}</td>
                                    <td class="p-3">{ if user.is_active { "Active" } else { "Disabled" } }</td>
                                    <td class="p-3">
                                        <button {onclick} class="text-sm underline">
                                            { if user.is_active { "Disable" } else { "Enable" } }
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
