//! Booking queue for staff

use crate::forms::select_value;
use crate::layout::StaffShell;
use chrono::Local;
use evcharge_frontend_common::client::booking_service;
use evcharge_frontend_common::{Alert, AlertKind, Spinner, describe_error};
use evcharge_http::types::{Booking, BookingFilter, BookingStatus};
use evcharge_http::ClientError;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BookingAction {
    Approve,
    Cancel,
    Complete,
}

impl BookingAction {
    fn label(self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Cancel => "Cancel",
            Self::Complete => "Complete",
        }
    }

    async fn apply(self, id: &str) -> Result<Booking, ClientError> {
        let service = booking_service()?;
        match self {
            Self::Approve => service.approve(id).await,
            Self::Cancel => service.cancel(id).await,
            Self::Complete => service.complete(id).await,
        }
    }
}

/// Transitions offered for a booking in `status`
pub(crate) fn staff_actions(status: BookingStatus) -> &'static [BookingAction] {
    match status {
        BookingStatus::Pending => &[BookingAction::Approve, BookingAction::Cancel],
        BookingStatus::Approved => &[BookingAction::Complete, BookingAction::Cancel],
        BookingStatus::Cancelled | BookingStatus::Completed => &[],
    }
}

fn parse_status(value: &str) -> Option<BookingStatus> {
    match value {
        "Pending" => Some(BookingStatus::Pending),
        "Approved" => Some(BookingStatus::Approved),
        "Cancelled" => Some(BookingStatus::Cancelled),
        "Completed" => Some(BookingStatus::Completed),
        _ => None,
    }
}

pub(crate) fn format_start(booking: &Booking) -> String {
    booking
        .reservation_start
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

#[function_component(BookingsPage)]
pub fn bookings_page() -> Html {
    let bookings = use_state(Vec::<Booking>::new);
    let status = use_state(|| Some(BookingStatus::Pending));
    let is_loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let success = use_state(|| Option::<String>::None);
    let generation = use_state(|| 0_u32);

    {
        let bookings = bookings.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        use_effect_with((*status, *generation), move |(status, _)| {
            let filter = BookingFilter {
                status: *status,
                station_id: None,
            };
            wasm_bindgen_futures::spawn_local(async move {
                let result = match booking_service() {
                    Ok(service) => service.list(&filter).await,
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

    let on_status = {
        let status = status.clone();
        Callback::from(move |e: Event| status.set(parse_status(&select_value(&e))))
    };

    let on_action = {
        let error = error.clone();
        let success = success.clone();
        let generation = generation.clone();
        Callback::from(move |(id, action): (String, BookingAction)| {
            let error = error.clone();
            let success = success.clone();
            let generation = generation.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match action.apply(&id).await {
                    Ok(booking) => {
                        success.set(Some(format!("Booking {} is now {}", booking.id, booking.status)));
                        generation.set(*generation + 1);
                    }
                    Err(err) => error.set(describe_error(&err)),
                }
            });
        })
    };

    html! {
        <StaffShell title="Bookings">
            <Alert kind={AlertKind::Error} message={(*error).clone()} />
            <Alert kind={AlertKind::Success} message={(*success).clone()} />
            <label class="block mb-4">
                <span class="text-sm text-gray-700">{"Status"}</span>
                <select onchange={on_status} class="ml-2 border rounded px-2 py-1">
                    <option value="" selected={status.is_none()}>{"All"}</option>
                    { for ["Pending", "Approved", "Cancelled", "Completed"].into_iter().map(|label| html! {
                        <option value={label} selected={status.map(|s| s.to_string()).as_deref() == Some(label)}>{label}</option>
                    }) }
                </select>
            </label>
            if *is_loading {
                <Spinner text={"Loading bookings..."} />
            } else {
                <table class="min-w-full bg-white rounded-lg shadow">
                    <thead>
                        <tr class="text-left text-sm text-gray-500">
                            <th class="p-3">{"Owner NIC"}</th>
                            <th class="p-3">{"Station"}</th>
                            <th class="p-3">{"Start"}</th>
                            <th class="p-3">{"Duration"}</th>
                            <th class="p-3">{"Status"}</th>
                            <th class="p-3"></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for bookings.iter().map(|booking| html! {
                            <tr class="border-t">
                                <td class="p-3 font-mono">{booking.owner_nic.clone()}</td>
                                <td class="p-3">{booking.station_id.clone()}</td>
                                <td class="p-3">{format_start(booking)}</td>
                                <td class="p-3">{format!("{} min", booking.duration_minutes)}</td>
                                <td class="p-3">{booking.status.to_string()}</td>
                                <td class="p-3 space-x-2">
                                    { for staff_actions(booking.status).iter().map(|action| {
                                        let action = *action;
                                        let id = booking.id.clone();
                                        let on_action = on_action.clone();
                                        let onclick = Callback::from(move |_: MouseEvent| on_action.emit((id.clone(), action)));
                                        html! { <button {onclick} class="text-sm underline">{action.label()}</button> }
                                    }) }
                                </td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            }
        </StaffShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_bookings_offer_no_actions() {
        assert!(staff_actions(BookingStatus::Cancelled).is_empty());
        assert!(staff_actions(BookingStatus::Completed).is_empty());
    }

    #[test]
    fn test_pending_bookings_can_be_approved() {
        assert_eq!(
            staff_actions(BookingStatus::Pending),
            &[BookingAction::Approve, BookingAction::Cancel]
        );
        assert!(staff_actions(BookingStatus::Approved).contains(&BookingAction::Complete));
    }

    #[test]
    fn test_status_filter_round_trips_display() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Approved,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert_eq!(parse_status(&status.to_string()), Some(status));
        }
        assert_eq!(parse_status(""), None);
    }
}
