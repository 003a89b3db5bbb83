use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the PostgREST endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            details: None,
            hint: None,
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiException {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
}

impl ApiException {
    pub fn from_body(status: u16, body: ApiError) -> Self {
        let message = if body.message.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body.message
        };
        Self {
            status,
            code: body.code,
            message,
        }
    }
}
