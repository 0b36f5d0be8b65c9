//! Error Types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    /// Request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type UiResult<T> = Result<T, UiError>;
