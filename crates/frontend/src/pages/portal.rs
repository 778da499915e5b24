//! EV owner portal

use super::bookings::format_start;
use crate::forms::{input_value, parse_local_datetime, select_value};
use crate::layout::PortalShell;
use chrono::{Local, TimeZone, Utc};
use evcharge_frontend_common::auth::use_current_user;
use evcharge_frontend_common::client::{booking_service, station_service};
use evcharge_frontend_common::{Alert, AlertKind, Route, Spinner, describe_error};
use evcharge_http::types::{Booking, BookingStatus, CreateBookingRequest, Station};
use yew::prelude::*;
use yew_router::prelude::*;

/// Slot lengths offered when booking
const DURATIONS: [u32; 4] = [30, 60, 90, 120];

#[function_component(PortalHomePage)]
pub fn portal_home_page() -> Html {
    let user = use_current_user();
    let greeting = user.map_or_else(|| "Welcome".to_string(), |user| format!("Welcome, {}", user.name));

    html! {
        <PortalShell title={greeting}>
            <div class="grid grid-cols-1 gap-6 sm:grid-cols-2">
                <Link<Route> to={Route::PortalNewBooking} classes="block bg-white rounded-lg shadow p-6 hover:shadow-md">
                    <h2 class="text-lg font-medium text-gray-900">{"Book a charging slot"}</h2>
                    <p class="mt-2 text-sm text-gray-500">{"Pick a station and a time that suits you."}</p>
                </Link<Route>>
                <Link<Route> to={Route::PortalBookings} classes="block bg-white rounded-lg shadow p-6 hover:shadow-md">
                    <h2 class="text-lg font-medium text-gray-900">{"My bookings"}</h2>
                    <p class="mt-2 text-sm text-gray-500">{"Review or cancel upcoming reservations."}</p>
                </Link<Route>>
            </div>
        </PortalShell>
    }
}

fn cancellable(booking: &Booking) -> bool {
    matches!(booking.status, BookingStatus::Pending | BookingStatus::Approved)
}

#[function_component(MyBookingsPage)]
pub fn my_bookings_page() -> Html {
    let user = use_current_user();
    let bookings = use_state(Vec::<Booking>::new);
    let is_loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let generation = use_state(|| 0_u32);

    // Owners sign in with their NIC, which is also their profile id
    let nic = user.map(|user| user.id).unwrap_or_default();

    {
        let bookings = bookings.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        use_effect_with((nic, *generation), move |(nic, _)| {
            let nic = nic.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match booking_service() {
                    Ok(service) => service.for_owner(&nic).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(loaded) => bookings.set(loaded),
                    Err(err) => error.set(describe_error(&err)),
                }
                is_loading.set(false);
            });
        });
    }

    let on_cancel = {
        let error = error.clone();
        let generation = generation.clone();
        Callback::from(move |id: String| {
            let error = error.clone();
            let generation = generation.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match booking_service() {
                    Ok(service) => service.cancel(&id).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(_) => generation.set(*generation + 1),
                    Err(err) => error.set(describe_error(&err)),
                }
            });
        })
    };

    html! {
        <PortalShell title="My Bookings">
            <Alert kind={AlertKind::Error} message={(*error).clone()} />
            if *is_loading {
                <Spinner text={"Loading your bookings..."} />
            } else if bookings.is_empty() {
                <p class="text-gray-600">{"You have no bookings yet."}</p>
            } else {
                <ul class="space-y-3">
                    { for bookings.iter().map(|booking| {
                        let id = booking.id.clone();
                        let on_cancel = on_cancel.clone();
                        let onclick = Callback::from(move |_: MouseEvent| on_cancel.emit(id.clone()));
                        html! {
                            <li class="bg-white rounded-lg shadow p-4 flex justify-between items-center">
                                <div>
                                    <p class="font-medium">{format_start(booking)}</p>
                                    <p class="text-sm text-gray-500">
                                        {format!("{} min at {} ({})", booking.duration_minutes, booking.station_id, booking.status)}
                                    </p>
                                </div>
                                if cancellable(booking) {
                                    <button {onclick} class="text-sm text-red-600 underline">{"Cancel"}</button>
                                }
                            </li>
                        }
                    }) }
                </ul>
            }
        </PortalShell>
    }
}

#[function_component(NewBookingPage)]
pub fn new_booking_page() -> Html {
    let user = use_current_user();
    let navigator = use_navigator();
    let stations = use_state(Vec::<Station>::new);
    let station_id = use_state(String::new);
    let start = use_state(String::new);
    let duration = use_state(|| DURATIONS[1]);
    let error = use_state(|| Option::<String>::None);
    let is_submitting = use_state(|| false);

    {
        let stations = stations.clone();
        let station_id = station_id.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = match station_service() {
                    Ok(service) => service.list(true).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(loaded) => {
                        if let Some(first) = loaded.first() {
                            station_id.set(first.id.clone());
                        }
                        stations.set(loaded);
                    }
                    Err(err) => error.set(describe_error(&err)),
                }
            });
        });
    }

    let on_station = {
        let station_id = station_id.clone();
        Callback::from(move |e: Event| station_id.set(select_value(&e)))
    };
    let on_start = {
        let start = start.clone();
        Callback::from(move |e: InputEvent| start.set(input_value(&e)))
    };
    let on_duration = {
        let duration = duration.clone();
        Callback::from(move |e: Event| {
            if let Ok(minutes) = select_value(&e).parse() {
                duration.set(minutes);
            }
        })
    };

    let onsubmit = {
        let nic = user.map(|user| user.id).unwrap_or_default();
        let station_id = station_id.clone();
        let start = start.clone();
        let duration = duration.clone();
        let error = error.clone();
        let is_submitting = is_submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let reservation_start = parse_local_datetime(&start)
                .and_then(|naive| Local.from_local_datetime(&naive).single())
                .map(|local| local.with_timezone(&Utc));
            let Some(reservation_start) = reservation_start else {
                error.set(Some("Choose a start date and time".to_string()));
                return;
            };
            if station_id.is_empty() {
                error.set(Some("Choose a station".to_string()));
                return;
            }

            let request = CreateBookingRequest {
                owner_nic: nic.clone(),
                station_id: (*station_id).clone(),
                reservation_start,
                duration_minutes: *duration,
            };
            let error = error.clone();
            let is_submitting = is_submitting.clone();
            let navigator = navigator.clone();
            is_submitting.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = match booking_service() {
                    Ok(service) => service.create(&request).await,
                    Err(err) => Err(err),
                };
                is_submitting.set(false);
                match result {
                    Ok(_) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::PortalBookings);
                        }
                    }
                    Err(err) => error.set(describe_error(&err)),
                }
            });
        })
    };

    html! {
        <PortalShell title="Book a Charging Slot">
            <Alert kind={AlertKind::Error} message={(*error).clone()} />
            <form {onsubmit} class="bg-white rounded-lg shadow p-6 space-y-4 max-w-lg">
                <label class="block">
                    <span class="text-sm text-gray-700">{"Station"}</span>
                    <select onchange={on_station} class="mt-1 w-full border rounded px-3 py-2">
                        { for stations.iter().map(|station| html! {
                            <option value={station.id.clone()} selected={*station_id == station.id}>
                                {format!("{} ({}, {})", station.name, station.location, station.charger_type)}
                            </option>
                        }) }
                    </select>
                </label>
                <label class="block">
                    <span class="text-sm text-gray-700">{"Start"}</span>
                    <input type="datetime-local" value={(*start).clone()} oninput={on_start}
                        class="mt-1 w-full border rounded px-3 py-2" />
                </label>
                <label class="block">
                    <span class="text-sm text-gray-700">{"Duration"}</span>
                    <select onchange={on_duration} class="mt-1 w-full border rounded px-3 py-2">
                        { for DURATIONS.into_iter().map(|minutes| html! {
                            <option value={minutes.to_string()} selected={*duration == minutes}>
                                {format!("{minutes} minutes")}
                            </option>
                        }) }
                    </select>
                </label>
                <button type="submit" disabled={*is_submitting}
                    class="w-full bg-emerald-600 hover:bg-emerald-700 disabled:bg-gray-400 text-white font-medium py-2 rounded">
                    { if *is_submitting { "Booking..." } else { "Request Booking" } }
                </button>
                if stations.is_empty() && error.is_none() {
                    <Spinner text={"Loading stations..."} />
                }
            </form>
        </PortalShell>
    }
}
