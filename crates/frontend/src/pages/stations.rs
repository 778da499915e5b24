//! Station management

use crate::forms::input_value;
use crate::layout::StaffShell;
use chrono::{Local, NaiveDate};
use evcharge_frontend_common::client::station_service;
use evcharge_frontend_common::{Alert, AlertKind, Route, Spinner, describe_error};
use evcharge_http::types::{AvailabilitySlot, Station};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(StationsPage)]
pub fn stations_page() -> Html {
    let stations = use_state(Vec::<Station>::new);
    let is_loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let success = use_state(|| Option::<String>::None);

    let reload = {
        let stations = stations.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        Callback::from(move |()| {
            let stations = stations.clone();
            let is_loading = is_loading.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match station_service() {
                    Ok(service) => service.list(false).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(loaded) => {
                        stations.set(loaded);
                        error.set(None);
                    }
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
        let reload = reload.clone();
        Callback::from(move |(id, activate): (String, bool)| {
            let error = error.clone();
            let success = success.clone();
            let reload = reload.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match station_service() {
                    Ok(service) if activate => service.activate(&id).await,
                    Ok(service) => service.deactivate(&id).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(station) => {
                        let state = if station.is_active { "activated" } else { "deactivated" };
                        success.set(Some(format!("{} {state}", station.name)));
                        reload.emit(());
                    }
                    Err(err) => error.set(describe_error(&err)),
                }
            });
        })
    };

    html! {
        <StaffShell title="Charging Stations">
            <Alert kind={AlertKind::Error} message={(*error).clone()} />
            <Alert kind={AlertKind::Success} message={(*success).clone()} />
            if *is_loading {
                <Spinner text={"Loading stations..."} />
            } else {
                <table class="min-w-full bg-white rounded-lg shadow">
                    <thead>
                        <tr class="text-left text-sm text-gray-500">
                            <th class="p-3">{"Name"}</th>
                            <th class="p-3">{"Location"}</th>
                            <th class="p-3">{"Type"}</th>
                            <th class="p-3">{"Slots"}</th>
                            <th class="p-3">{"Status"}</th>
                            <th class="p-3"></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for stations.iter().map(|station| {
                            let id = station.id.clone();
                            let activate = !station.is_active;
                            let on_toggle = on_toggle.clone();
                            let onclick = Callback::from(move |_: MouseEvent| on_toggle.emit((id.clone(), activate)));
                            html! {
                                <tr class="border-t">
                                    <td class="p-3">
                                        <Link<Route> to={Route::StationDetail { id: station.id.clone() }} classes="text-emerald-600 underline">
                                            {station.name.clone()}
                                        </Link<Route>>
                                    </td>
                                    <td class="p-3">{station.location.clone()}</td>
                                    <td class="p-3">{station.charger_type.to_string()}</td>
                                    <td class="p-3">{format!("{}/{}", station.available_slots, station.total_slots)}</td>
                                    <td class="p-3">{ if station.is_active { "Active" } else { "Inactive" } }</td>
                                    <td class="p-3">
                                        <button {onclick} class="text-sm underline">
                                            { if station.is_active { "Deactivate" } else { "Activate" } }
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

#[derive(Properties, PartialEq)]
pub struct StationDetailProps {
    pub id: String,
}

#[function_component(StationDetailPage)]
pub fn station_detail_page(props: &StationDetailProps) -> Html {
    let station = use_state(|| Option::<Station>::None);
    let slots = use_state(Vec::<AvailabilitySlot>::new);
    let date = use_state(|| Local::now().date_naive());
    let error = use_state(|| Option::<String>::None);

    {
        let station = station.clone();
        let error = error.clone();
        use_effect_with(props.id.clone(), move |id| {
            let id = id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match station_service() {
                    Ok(service) => service.get(&id).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(loaded) => station.set(Some(loaded)),
                    Err(err) => error.set(describe_error(&err)),
                }
            });
        });
    }

    {
        let slots = slots.clone();
        let error = error.clone();
        use_effect_with((props.id.clone(), *date), move |(id, date)| {
            let id = id.clone();
            let date = *date;
            wasm_bindgen_futures::spawn_local(async move {
                let result = match station_service() {
                    Ok(service) => service.availability(&id, date).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(loaded) => slots.set(loaded),
                    Err(err) => error.set(describe_error(&err)),
                }
            });
        });
    }

    let on_date = {
        let date = date.clone();
        Callback::from(move |e: InputEvent| {
            if let Ok(picked) = NaiveDate::parse_from_str(&input_value(&e), "%Y-%m-%d") {
                date.set(picked);
            }
        })
    };

    let title = station
        .as_ref()
        .map_or_else(|| "Station".to_string(), |station| station.name.clone());

    html! {
        <StaffShell {title}>
            <Alert kind={AlertKind::Error} message={(*error).clone()} />
            if let Some(station) = station.as_ref() {
                <div class="bg-white rounded-lg shadow p-6 mb-6">
                    <p>{format!("Location: {}", station.location)}</p>
                    <p>{format!("Charger: {}", station.charger_type)}</p>
                    <p>{format!("Slots: {} available of {}", station.available_slots, station.total_slots)}</p>
                </div>
            }
            <label class="block mb-4">
                <span class="text-sm text-gray-700">{"Availability on"}</span>
                <input type="date" value={date.format("%Y-%m-%d").to_string()} oninput={on_date}
                    class="ml-2 border rounded px-2 py-1" />
            </label>
            <ul class="space-y-2">
                { for slots.iter().map(|slot| html! {
                    <li class="bg-white rounded shadow p-3">
                        {format!(
                            "{} - {}: {} free",
                            slot.start.with_timezone(&Local).format("%H:%M"),
                            slot.end.with_timezone(&Local).format("%H:%M"),
                            slot.available_slots
                        )}
                    </li>
                }) }
            </ul>
        </StaffShell>
    }
}
