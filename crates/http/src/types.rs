//! Request and response bodies exchanged with the backend

use chrono::{DateTime, Utc};
use evcharge_core::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChargerType {
    Ac,
    Dc,
}

impl fmt::Display for ChargerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ac => f.write_str("AC"),
            Self::Dc => f.write_str("DC"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "Type")]
    pub charger_type: ChargerType,
    pub total_slots: u32,
    pub available_slots: u32,
    pub is_active: bool,
    #[serde(default)]
    pub operator_id: Option<String>,
}

/// Create or update body for a station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct StationRequest {
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "Type")]
    pub charger_type: ChargerType,
    pub total_slots: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
}

/// One bookable window as computed by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct AvailabilitySlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available_slots: u32,
}

/// Back office account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct StaffUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// EV owner, keyed by national identity number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct EvOwner {
    pub nic: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub is_active: bool,
}

impl EvOwner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EvOwnerRequest {
    pub nic: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Approved,
    Cancelled,
    Completed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Booking {
    pub id: String,
    pub owner_nic: String,
    pub station_id: String,
    pub reservation_start: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateBookingRequest {
    pub owner_nic: String,
    pub station_id: String,
    pub reservation_start: DateTime<Utc>,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateBookingRequest {
    pub reservation_start: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// Filters for booking listings
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub station_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct DashboardStats {
    pub total_stations: u32,
    pub active_stations: u32,
    pub total_owners: u32,
    pub pending_bookings: u32,
    pub approved_bookings: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_station_wire_names() {
        let station: Station = serde_json::from_value(json!({
            "Id": "st-1",
            "Name": "Kandy Central",
            "Location": "Kandy",
            "Type": "DC",
            "TotalSlots": 4,
            "AvailableSlots": 2,
            "IsActive": true
        }))
        .unwrap();
        assert_eq!(station.charger_type, ChargerType::Dc);
        assert_eq!(station.latitude, None);
    }

    #[test]
    fn test_station_request_skips_empty_fields() {
        let body = serde_json::to_value(StationRequest {
            name: "Galle Road".into(),
            location: "Colombo 03".into(),
            latitude: None,
            longitude: None,
            charger_type: ChargerType::Ac,
            total_slots: 6,
            operator_id: None,
        })
        .unwrap();
        assert_eq!(body["Type"], "AC");
        assert!(body.get("Latitude").is_none());
    }
}
