//! EV charging backend client
//!
//! Every backend call goes through [`ApiClient`]. It attaches the stored
//! bearer token, and on a 401 joins the single in-flight refresh before
//! replaying the request once with the new token.

pub mod auth;
pub mod error;
mod events;
pub mod refresh;
mod request;

pub use error::ClientError;
pub use events::SessionEvent;
pub use refresh::{RefreshCoordinator, RefreshFailure};
pub use request::ApiRequest;

use crate::config::ClientConfig;
use crate::store::TokenStore;
use events::SessionEvents;
use evcharge_core::{ApiEnvelope, CredentialRecord};
use refresh::RefreshTicket;
use reqwest::{ClientBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub const REFRESH_PATH: &str = "/api/auth/refresh";

const DEFAULT_USER_AGENT: &str = concat!("evcharge-client/", env!("CARGO_PKG_VERSION"));

/// Shared, cheaply cloneable request pipeline
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
    refresh: RefreshCoordinator,
    events: SessionEvents,
}

impl ApiClient {
    /// Create a client with in-memory credentials
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.tokens.is_authenticated()
    }

    /// Whether a token refresh is currently in flight
    pub fn is_refreshing(&self) -> bool {
        self.inner.refresh.is_refreshing()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Send an authenticated request, recovering once from a 401
    pub async fn send(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        let token = self.inner.tokens.access_token();
        let response = self.dispatch(request, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // From here on the request counts as retried
        let fresh = match (token.as_deref(), self.inner.tokens.access_token()) {
            (Some(sent), Some(current)) if sent != current => {
                debug!(path = request.path(), "Token rotated while request was in flight");
                current
            }
            (Some(_), None) => {
                debug!(path = request.path(), "Session ended while request was in flight");
                return Err(ClientError::SessionExpired("Session has ended".into()));
            }
            _ => self.refresh_access_token().await?,
        };

        let replay = self.dispatch(request, Some(&fresh)).await?;
        if replay.status() == StatusCode::UNAUTHORIZED {
            let message = error_message(replay).await;
            warn!(path = request.path(), "Request rejected again after refresh");
            self.terminate_session("Credentials rejected after refresh");
            return Err(ClientError::AuthenticationFailed(message));
        }
        Ok(replay)
    }

    /// Send a request without credentials and without 401 recovery
    pub async fn send_public(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        self.dispatch(request, None).await
    }

    /// Send an authenticated request and unwrap the response envelope
    pub async fn call<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        Ok(read_envelope::<T>(response).await?.into_result()?)
    }

    /// Like [`call`](Self::call) for endpoints whose payload is irrelevant
    pub async fn call_unit(&self, request: &ApiRequest) -> Result<(), ClientError> {
        let response = self.send(request).await?;
        Ok(read_envelope::<serde_json::Value>(response)
            .await?
            .into_unit()?)
    }

    /// Public counterpart of [`call`](Self::call)
    pub async fn call_public<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.send_public(request).await?;
        Ok(read_envelope::<T>(response).await?.into_result()?)
    }

    /// Renew the session, joining a refresh already in flight.
    ///
    /// Returns the new access token. On failure the credential record is
    /// gone and the session has been terminated.
    pub async fn refresh_session(&self) -> Result<String, ClientError> {
        self.refresh_access_token().await
    }

    async fn refresh_access_token(&self) -> Result<String, ClientError> {
        let guard = match self.inner.refresh.join() {
            RefreshTicket::Follower(waiter) => {
                return waiter
                    .outcome()
                    .await
                    .map_err(|failure| ClientError::SessionExpired(failure.0));
            }
            RefreshTicket::Leader(guard) => guard,
        };

        let outcome = match self.perform_refresh().await {
            Ok(record) => {
                info!(user_id = %record.user.id, expires_at = %record.expires_at, "Session refreshed");
                self.inner.events.emit(SessionEvent::Refreshed {
                    expires_at: record.expires_at,
                });
                Ok(record.access_token)
            }
            Err(err) => {
                warn!("Token refresh failed: {err}");
                self.terminate_session(&err.to_string());
                Err(RefreshFailure(err.to_string()))
            }
        };

        guard
            .settle(outcome)
            .map_err(|failure| ClientError::SessionExpired(failure.0))
    }

    async fn perform_refresh(&self) -> Result<CredentialRecord, ClientError> {
        let refresh_token = self
            .inner
            .tokens
            .refresh_token()
            .ok_or_else(|| ClientError::SessionExpired("No refresh token available".into()))?;

        let request = ApiRequest::post(REFRESH_PATH).json(&crate::types::RefreshRequest {
            refresh_token,
        })?;
        let record: CredentialRecord = self.call_public(&request).await?;
        self.inner.tokens.store(&record)?;
        Ok(record)
    }

    pub(crate) fn establish(&self, record: &CredentialRecord) -> Result<(), ClientError> {
        self.inner.tokens.store(record)?;
        self.inner
            .events
            .emit(SessionEvent::LoggedIn(record.user.clone()));
        Ok(())
    }

    pub(crate) fn end_session(&self) -> Result<(), ClientError> {
        self.inner.tokens.clear()?;
        self.inner.events.emit(SessionEvent::LoggedOut);
        Ok(())
    }

    /// Clear credentials and announce the end of the session, once
    fn terminate_session(&self, reason: &str) {
        match self.inner.tokens.clear() {
            Ok(true) => {}
            Ok(false) => {
                debug!("Session already terminated");
                return;
            }
            Err(err) => warn!("Failed to clear credentials: {err}"),
        }
        self.inner.events.emit(SessionEvent::Terminated {
            reason: reason.to_string(),
        });
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<Response, ClientError> {
        let mut builder = request.build(&self.inner.http, &self.inner.base_url)?;
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        debug!(method = %request.method(), path = request.path(), "Dispatching request");
        Ok(builder.send().await?)
    }
}

/// Decode an envelope, turning error statuses into [`ClientError`]s
async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<ApiEnvelope<T>, ClientError> {
    let status = response.status();
    if status.is_success() {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        let message = error_message(response).await;
        Err(ClientError::from_status(status, message))
    }
}

/// Best message available from an error response
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
        .ok()
        .and_then(|envelope| envelope.message)
        .or_else(|| (!body.trim().is_empty()).then(|| body.clone()))
        .unwrap_or_else(|| status.to_string())
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    tokens: Option<TokenStore>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the credential store shared with the rest of the application
    pub fn tokens(mut self, tokens: TokenStore) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Apply base URL, timeout and user agent from a configuration
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.timeout = config.timeout();
        self.user_agent = config.user_agent.clone();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        );

        let http = client_builder.build()?;

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                tokens: self.tokens.unwrap_or_else(TokenStore::in_memory),
                refresh: RefreshCoordinator::new(),
                events: SessionEvents::new(),
            }),
        })
    }
}
