//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend origin used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable prefix, e.g. `EVCHARGE_BASE_URL`
pub const ENV_PREFIX: &str = "EVCHARGE";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, without trailing slash
    pub base_url: String,

    /// Refresh this many seconds before the access token expires
    pub refresh_lead_secs: u64,

    /// Interval of the proactive session check
    pub session_check_secs: u64,

    /// Request timeout (ignored on wasm)
    pub timeout_secs: Option<u64>,

    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_lead_secs: 300,
            session_check_secs: 120,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Configuration with a specific backend origin
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Lead window, clamped to the largest representable duration
    pub fn refresh_lead(&self) -> chrono::Duration {
        i64::try_from(self.refresh_lead_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }

    pub fn session_check_interval(&self) -> Duration {
        Duration::from_secs(self.session_check_secs.max(1))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ClientConfig {
    /// Load defaults, then an optional file, then `EVCHARGE_*` variables
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or a value has the
    /// wrong type
    pub fn load(path: Option<&std::path::Path>) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("refresh_lead_secs", defaults.refresh_lead_secs)?
            .set_default("session_check_secs", defaults.session_check_secs)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.refresh_lead(), chrono::Duration::minutes(5));
        assert_eq!(config.session_check_interval(), Duration::from_secs(120));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = ClientConfig {
            session_check_secs: 0,
            ..ClientConfig::default()
        };
        assert_eq!(config.session_check_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_huge_refresh_lead_is_clamped() {
        for refresh_lead_secs in [u64::MAX, 1_000_000_000_000_000] {
            let config = ClientConfig {
                refresh_lead_secs,
                ..ClientConfig::default()
            };
            let lead = config.refresh_lead();
            assert!(lead > chrono::Duration::days(365 * 1000), "{refresh_lead_secs}");
        }
        let config = ClientConfig {
            refresh_lead_secs: u64::MAX,
            ..ClientConfig::default()
        };
        assert_eq!(config.refresh_lead(), chrono::Duration::MAX);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(
            &path,
            "base_url = \"https://charge.example.com\"\ntimeout_secs = 15\n",
        )
        .unwrap();

        let config = ClientConfig::load(Some(&path)).unwrap();

        assert_eq!(config.base_url, "https://charge.example.com");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.refresh_lead_secs, 300);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.session_check_secs, 120);
    }
}
