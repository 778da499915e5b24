//! Integration tests for the request pipeline

mod common;

use common::{credentials, ok, record, rejected};
use evcharge_http::{ApiClient, ApiRequest, ClientError, SessionEvent};
use futures::future::join_all;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FAR_EXPIRY: &str = "2099-01-01T00:00:00Z";

async fn signed_in_client(server: &MockServer, access: &str) -> ApiClient {
    let client = ApiClient::new(server.uri()).unwrap();
    client
        .tokens()
        .store(&record(access, "refresh-1", FAR_EXPIRY))
        .unwrap();
    client
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = ApiClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_trimmed() {
    let client = ApiClient::new("http://localhost:5000/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:5000");
}

#[tokio::test]
async fn test_login_stores_credentials_and_notifies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "Username": "nimal", "Password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok(credentials("a-1", "r-1", FAR_EXPIRY))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let mut events = client.subscribe();

    let user = client.login("nimal", "secret").await.unwrap();

    assert_eq!(user, common::operator());
    assert!(client.is_authenticated());
    assert_eq!(client.tokens().access_token().as_deref(), Some("a-1"));
    assert_eq!(client.tokens().refresh_token().as_deref(), Some("r-1"));
    assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedIn(user));
}

#[tokio::test]
async fn test_login_with_bad_credentials_does_not_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(rejected("Invalid credentials")))
        .mount(&server)
        .await;
    Mock::given(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let err = client.login("nimal", "wrong").await.unwrap_err();

    match err {
        ClientError::AuthenticationFailed(message) => assert_eq!(message, "Invalid credentials"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_rejected_envelope_surfaces_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rejected("Station registry offline")))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "a-1").await;
    let err = client
        .call::<serde_json::Value>(&ApiRequest::get("/api/stations"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Rejected(ref m) if m == "Station registry offline"));
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer a-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok(serde_json::to_value(common::operator()).unwrap())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "a-1").await;
    assert_eq!(client.me().await.unwrap(), common::operator());
}

#[tokio::test]
async fn test_concurrent_unauthorized_requests_share_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([]))))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({ "RefreshToken": "refresh-1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok(credentials("fresh", "refresh-2", FAR_EXPIRY)))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "stale").await;
    let mut events = client.subscribe();

    let request = ApiRequest::get("/api/bookings");
    let results = join_all((0..3).map(|_| client.call::<Vec<serde_json::Value>>(&request))).await;

    for result in results {
        assert!(result.unwrap().is_empty());
    }
    assert_eq!(client.tokens().access_token().as_deref(), Some("fresh"));
    assert_eq!(client.tokens().refresh_token().as_deref(), Some("refresh-2"));
    assert!(!client.is_refreshing());
    assert!(matches!(
        events.recv().await.unwrap(),
        SessionEvent::Refreshed { .. }
    ));
}

#[tokio::test]
async fn test_second_unauthorized_terminates_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(401).set_body_json(rejected("Token revoked")))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok(credentials("a-2", "r-2", FAR_EXPIRY))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "a-1").await;
    let mut events = client.subscribe();

    let err = client
        .call::<serde_json::Value>(&ApiRequest::get("/api/users"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::AuthenticationFailed(ref m) if m == "Token revoked"));
    assert!(err.is_auth_expired());
    assert!(!client.is_authenticated());
    assert!(client.tokens().read().is_none());
    assert!(matches!(
        events.recv().await.unwrap(),
        SessionEvent::Refreshed { .. }
    ));
    assert!(matches!(
        events.recv().await.unwrap(),
        SessionEvent::Terminated { .. }
    ));
}

#[tokio::test]
async fn test_failed_refresh_clears_credentials_for_every_waiter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/evowners"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(rejected("Refresh token expired"))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "a-1").await;
    let mut events = client.subscribe();

    let request = ApiRequest::get("/api/evowners");
    let results =
        join_all((0..2).map(|_| client.call::<Vec<serde_json::Value>>(&request))).await;

    for result in results {
        let err = result.unwrap_err();
        assert!(matches!(err, ClientError::SessionExpired(_)), "{err:?}");
    }
    assert!(!client.is_authenticated());
    assert!(!client.is_refreshing());
    assert!(matches!(
        events.recv().await.unwrap(),
        SessionEvent::Terminated { .. }
    ));
}

#[tokio::test]
async fn test_late_unauthorized_after_failed_refresh_terminates_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stations"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(400)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(rejected("Refresh token expired"))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "a-1").await;
    let mut events = client.subscribe();

    let stations = ApiRequest::get("/api/stations");
    let bookings = ApiRequest::get("/api/bookings");
    let (early, late) = tokio::join!(
        client.call::<serde_json::Value>(&stations),
        client.call::<serde_json::Value>(&bookings),
    );

    assert!(matches!(early, Err(ClientError::SessionExpired(_))), "{early:?}");
    assert!(matches!(late, Err(ClientError::SessionExpired(_))), "{late:?}");
    assert!(!client.is_authenticated());

    let mut terminated = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, SessionEvent::Terminated { .. }) {
            terminated += 1;
        }
    }
    assert_eq!(terminated, 1);
}

#[tokio::test]
async fn test_late_unauthorized_after_refresh_replays_with_new_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stations"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(400)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([]))))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok(credentials("fresh", "refresh-2", FAR_EXPIRY)))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "stale").await;

    let stations = ApiRequest::get("/api/stations");
    let bookings = ApiRequest::get("/api/bookings");
    let (early, late) = tokio::join!(
        client.call::<Vec<serde_json::Value>>(&stations),
        client.call::<Vec<serde_json::Value>>(&bookings),
    );

    assert!(early.unwrap().is_empty());
    assert!(late.unwrap().is_empty());
    assert_eq!(client.tokens().access_token().as_deref(), Some("fresh"));
    assert!(!client.is_refreshing());
}

#[tokio::test]
async fn test_unauthorized_without_refresh_token_expires_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let err = client
        .call::<serde_json::Value>(&ApiRequest::get("/api/dashboard/stats"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired(_)));
}

#[tokio::test]
async fn test_non_auth_errors_pass_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stations/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(rejected("Station not found")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stations/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "a-1").await;

    let err = client
        .call::<serde_json::Value>(&ApiRequest::get("/api/stations/missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(ref m) if m == "Station not found"));

    let err = client
        .call::<serde_json::Value>(&ApiRequest::get("/api/stations/broken"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ServerError { status: 500, ref message } if message == "boom"));
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_credentials_even_when_backend_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", "Bearer a-1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "a-1").await;
    let mut events = client.subscribe();

    client.logout().await.unwrap();

    assert!(!client.is_authenticated());
    assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedOut);
}

#[tokio::test]
async fn test_connection_failure_is_connectivity_error() {
    let client = ApiClient::builder()
        .base_url("http://127.0.0.1:9")
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = client
        .call::<serde_json::Value>(&ApiRequest::get("/api/stations"))
        .await
        .unwrap_err();
    assert!(err.is_connectivity(), "{err:?}");
}
