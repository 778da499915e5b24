//! Client wiring for a single CLI invocation

use crate::state_dir;
use anyhow::{Context as _, Result};
use evcharge_http::{ApiClient, ClientConfig, FileStorage, TokenStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub struct AppContext {
    pub client: ApiClient,
    pub config: ClientConfig,
}

impl AppContext {
    /// Load configuration and open the credential file in `state_dir`
    pub fn new(
        state_dir: &std::path::Path,
        config_file: Option<PathBuf>,
        base_url: Option<String>,
    ) -> Result<Self> {
        let config_file = config_file.unwrap_or_else(|| state_dir::config_path(state_dir));
        let mut config = ClientConfig::load(Some(&config_file))
            .with_context(|| format!("Failed to load configuration from {}", config_file.display()))?;
        if let Some(base_url) = base_url {
            config.base_url = base_url;
        }

        let storage = FileStorage::new(state_dir::credentials_path(state_dir));
        let tokens = TokenStore::new(Arc::new(storage)).with_refresh_lead(config.refresh_lead());
        let client = ApiClient::builder().config(&config).tokens(tokens).build()?;
        debug!(base_url = client.base_url(), "Client ready");

        Ok(Self { client, config })
    }
}
