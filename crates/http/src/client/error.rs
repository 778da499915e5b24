//! Client error types

use crate::store::StorageError;
use evcharge_core::EnvelopeError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error, no usable response
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Credentials were rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The session could not be renewed and has been cleared
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The backend answered `Success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The backend answered `Success: true` without data
    #[error("Response carried no data")]
    MissingData,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credential storage failed
    #[error("Credential storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the caller should send the user back to a login entry point
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed(_) | Self::SessionExpired(_)
        )
    }

    /// Whether no response was received at all
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Request(err) => !err.is_decode() && err.status().is_none(),
            _ => false,
        }
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected(message) => Self::Rejected(message),
            EnvelopeError::MissingData => Self::MissingData,
        }
    }
}
