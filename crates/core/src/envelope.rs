//! Response envelope shared by every backend endpoint

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `{ Success, Data, Message }` wrapper around every response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The backend answered with `Success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// `Success: true` without a payload where one was required
    #[error("Response carried no data")]
    MissingData,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Check `Success` before trusting `Data`
    pub fn into_result(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected(self.rejection_message()));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }

    /// For endpoints whose payload is irrelevant (deletes, state changes)
    pub fn into_unit(self) -> Result<(), EnvelopeError> {
        if self.success {
            Ok(())
        } else {
            Err(EnvelopeError::Rejected(self.rejection_message()))
        }
    }

    fn rejection_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "Request was not successful".to_string())
    }
}
