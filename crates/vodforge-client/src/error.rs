//! Client error types.

use std::time::Duration;

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Encoding service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("API request failed with status {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Invalid response from encoding service: {0}")]
    InvalidResponse(String),

    #[error("Missing required setting: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Polling deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Transient failures worth retrying. Definitive API rejections
    /// (4xx) and terminal polling outcomes are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::ServiceUnavailable(_) | ClientError::Network(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        assert!(ClientError::Api { status: 503, detail: "overloaded".into() }.is_retryable());
        assert!(!ClientError::Api { status: 404, detail: "no such encoding".into() }.is_retryable());
    }

    #[test]
    fn test_terminal_polling_errors_are_not_retryable() {
        assert!(!ClientError::Cancelled.is_retryable());
        assert!(!ClientError::DeadlineExceeded(Duration::from_secs(60)).is_retryable());
    }
}
