//! Frontend configuration

use evcharge_http::ClientConfig;
use evcharge_http::config::DEFAULT_BASE_URL;

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Shown on the login page after the session could not be renewed
    pub const SESSION_EXPIRED_NOTICE: &'static str =
        "Your session has expired. Please sign in again.";

    /// Backend origin, fixed at build time through `EVCHARGE_API_BASE_URL`
    pub fn base_url() -> &'static str {
        option_env!("EVCHARGE_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn client_config() -> ClientConfig {
        ClientConfig::with_base_url(Self::base_url())
    }

    /// Session check interval in milliseconds, as gloo timers expect it
    pub fn session_check_interval_ms() -> u32 {
        let interval = Self::client_config().session_check_interval();
        u32::try_from(interval.as_millis()).unwrap_or(u32::MAX)
    }
}
