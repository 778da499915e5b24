//! The application's single client instance
//!
//! Every page and service shares one [`ApiClient`], so that all of them
//! rendezvous on the same refresh coordinator and credential record.

use crate::config::AuthConfig;
use crate::storage::BrowserStorage;
use evcharge_http::services::{
    BookingService, DashboardService, EvOwnerService, StationService, UserService,
};
use evcharge_http::{ApiClient, ClientError, TokenStore};
use std::cell::RefCell;
use std::sync::Arc;
use tracing::debug;

thread_local! {
    static CLIENT: RefCell<Option<ApiClient>> = const { RefCell::new(None) };
}

/// Shared client, created on first use
pub fn api_client() -> Result<ApiClient, ClientError> {
    CLIENT.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let config = AuthConfig::client_config();
        let tokens = TokenStore::new(Arc::new(BrowserStorage)).with_refresh_lead(config.refresh_lead());
        let client = ApiClient::builder().config(&config).tokens(tokens).build()?;
        debug!(base_url = client.base_url(), "Created API client");

        *slot = Some(client.clone());
        Ok(client)
    })
}

pub fn station_service() -> Result<StationService, ClientError> {
    api_client().map(StationService::new)
}

pub fn user_service() -> Result<UserService, ClientError> {
    api_client().map(UserService::new)
}

pub fn owner_service() -> Result<EvOwnerService, ClientError> {
    api_client().map(EvOwnerService::new)
}

pub fn booking_service() -> Result<BookingService, ClientError> {
    api_client().map(BookingService::new)
}

pub fn dashboard_service() -> Result<DashboardService, ClientError> {
    api_client().map(DashboardService::new)
}

/// Message for an inline error banner.
///
/// Authentication failures are not shown inline: the session has already
/// been terminated and the guards are redirecting to a login page.
pub fn describe_error(err: &ClientError) -> Option<String> {
    if err.is_auth_expired() {
        return None;
    }
    if err.is_connectivity() {
        return Some("Cannot reach the server. Check your connection and try again.".to_string());
    }
    Some(match err {
        ClientError::Rejected(message)
        | ClientError::BadRequest(message)
        | ClientError::NotFound(message)
        | ClientError::Forbidden(message) => message.clone(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_are_not_shown_inline() {
        assert_eq!(
            describe_error(&ClientError::SessionExpired("refresh rejected".into())),
            None
        );
        assert_eq!(
            describe_error(&ClientError::AuthenticationFailed("bad token".into())),
            None
        );
    }

    #[test]
    fn test_backend_messages_are_shown_verbatim() {
        assert_eq!(
            describe_error(&ClientError::Rejected("Slot already booked".into())).as_deref(),
            Some("Slot already booked")
        );
        assert_eq!(
            describe_error(&ClientError::ServerError {
                status: 503,
                message: "maintenance".into()
            })
            .as_deref(),
            Some("Server error 503: maintenance")
        );
    }
}
