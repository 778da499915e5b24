//! Domain services hit the expected endpoints

mod common;

use common::{ok, record};
use evcharge_http::services::{BookingService, DashboardService, EvOwnerService, StationService};
use evcharge_http::types::{BookingFilter, BookingStatus, ChargerType};
use evcharge_http::ApiClient;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> ApiClient {
    let client = ApiClient::new(server.uri()).unwrap();
    client
        .tokens()
        .store(&record("a-1", "r-1", "2099-01-01T00:00:00Z"))
        .unwrap();
    client
}

fn station(active: bool) -> serde_json::Value {
    json!({
        "Id": "st-1",
        "Name": "Kandy Central",
        "Location": "Kandy",
        "Type": "AC",
        "TotalSlots": 4,
        "AvailableSlots": 1,
        "IsActive": active
    })
}

fn booking(status: &str) -> serde_json::Value {
    json!({
        "Id": "bk-1",
        "OwnerNic": "199012345678",
        "StationId": "st-1",
        "ReservationStart": "2030-02-01T08:00:00Z",
        "DurationMinutes": 60,
        "Status": status,
        "CreatedAt": "2030-01-20T10:00:00Z"
    })
}

#[tokio::test]
async fn test_station_listing_and_activation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stations"))
        .and(query_param("active", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([station(true)]))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/stations/st-1/deactivate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(station(false))))
        .expect(1)
        .mount(&server)
        .await;

    let stations = StationService::new(client(&server).await);

    let listed = stations.list(true).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].charger_type, ChargerType::Ac);

    let updated = stations.deactivate("st-1").await.unwrap();
    assert!(!updated.is_active);
}

#[tokio::test]
async fn test_station_availability_sends_date() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stations/st-1/availability"))
        .and(query_param("date", "2030-02-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([{
            "Start": "2030-02-01T08:00:00Z",
            "End": "2030-02-01T09:00:00Z",
            "AvailableSlots": 3
        }]))))
        .expect(1)
        .mount(&server)
        .await;

    let stations = StationService::new(client(&server).await);
    let date = NaiveDate::from_ymd_opt(2030, 2, 1).unwrap();

    let slots = stations.availability("st-1", date).await.unwrap();
    assert_eq!(slots[0].available_slots, 3);
}

#[tokio::test]
async fn test_booking_filters_and_transitions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(query_param("status", "Pending"))
        .and(query_param("stationId", "st-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([booking("Pending")]))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/bookings/bk-1/approve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(booking("Approved"))))
        .expect(1)
        .mount(&server)
        .await;

    let bookings = BookingService::new(client(&server).await);

    let pending = bookings
        .list(&BookingFilter {
            status: Some(BookingStatus::Pending),
            station_id: Some("st-1".into()),
        })
        .await
        .unwrap();
    assert_eq!(pending[0].status, BookingStatus::Pending);

    let approved = bookings.approve("bk-1").await.unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);
}

#[tokio::test]
async fn test_owner_deactivation_and_delete() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/evowners/199012345678/deactivate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "Nic": "199012345678",
            "FirstName": "Kumari",
            "LastName": "Silva",
            "Email": "kumari@example.com",
            "IsActive": false
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/evowners/199012345678"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "Data": null,
            "Message": "Deleted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let owners = EvOwnerService::new(client(&server).await);

    let owner = owners.set_active("199012345678", false).await.unwrap();
    assert_eq!(owner.full_name(), "Kumari Silva");
    assert!(!owner.is_active);

    owners.delete("199012345678").await.unwrap();
}

#[tokio::test]
async fn test_identifiers_are_encoded_into_one_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/owner/1990%2F12%3Fx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([booking("Pending")]))))
        .expect(1)
        .mount(&server)
        .await;

    let bookings = BookingService::new(client(&server).await);
    let mine = bookings.for_owner("1990/12?x").await.unwrap();
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn test_dashboard_stats() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "TotalStations": 12,
            "ActiveStations": 10,
            "TotalOwners": 340,
            "PendingBookings": 7,
            "ApprovedBookings": 21
        }))))
        .mount(&server)
        .await;

    let stats = DashboardService::new(client(&server).await).stats().await.unwrap();
    assert_eq!(stats.active_stations, 10);
    assert_eq!(stats.pending_bookings, 7);
}
