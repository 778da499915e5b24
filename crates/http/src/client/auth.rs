//! Authentication API client methods

use super::{ApiClient, ApiRequest, ClientError};
use crate::types::LoginRequest;
use evcharge_core::{CredentialRecord, UserProfile};
use tracing::{debug, info};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LOGOUT_PATH: &str = "/api/auth/logout";
pub const ME_PATH: &str = "/api/auth/me";

impl ApiClient {
    /// Sign in and persist the returned credential record
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<UserProfile, ClientError> {
        let request = ApiRequest::post(LOGIN_PATH).json(&LoginRequest {
            username: username.into(),
            password: password.into(),
        })?;

        let record: CredentialRecord = self.call_public(&request).await?;
        self.establish(&record)?;
        info!(user_id = %record.user.id, role = %record.user.role, "Signed in");
        Ok(record.user)
    }

    /// Sign out. Local credentials are cleared whatever the backend answers.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Some(token) = self.tokens().access_token() {
            let request = ApiRequest::post(LOGOUT_PATH);
            match self.dispatch(&request, Some(&token)).await {
                Ok(response) => debug!(status = %response.status(), "Logout acknowledged"),
                Err(err) => debug!("Logout request failed: {err}"),
            }
        }
        self.end_session()?;
        info!("Signed out");
        Ok(())
    }

    /// Fetch the signed-in profile from the backend
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.call(&ApiRequest::get(ME_PATH)).await
    }
}
