//! Error types for the BotOrNot SDK.

use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Backend answered with an error status or an error payload
    #[error("{0}")]
    Backend(String),

    /// Connection error (network, DNS, refused)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body did not match the expected schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request rejected before sending
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Client configuration error (bad base URL)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SdkError::Timeout
        } else if e.is_connect() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::Backend(format!("Backend error HTTP {}", status.as_u16()))
        } else {
            SdkError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}
