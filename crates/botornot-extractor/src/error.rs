//! Error types for the Extractor
//!
//! The extraction and attribution functions are total and never return
//! these; they cover configuration and structured expert payloads only.

use thiserror::Error;

/// Errors that can occur while configuring the extractor or decoding a
/// structured expert payload
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Expert payload did not have the expected shape
    #[error("Invalid expert payload: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The payload carried an `error` field instead of experts
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

impl From<toml::de::Error> for ExtractorError {
    fn from(e: toml::de::Error) -> Self {
        ExtractorError::Config(format!("Failed to parse TOML: {}", e))
    }
}
