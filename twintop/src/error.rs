//! Errors from polling the metrics agent.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid agent url: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("agent answered {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed metrics body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("metric {field} is not a finite number")]
    NonFinite { field: &'static str },
}
