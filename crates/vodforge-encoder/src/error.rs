//! Encoder error types.

use thiserror::Error;

use vodforge_client::ClientError;

pub type EncoderResult<T> = Result<T, EncoderError>;

#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("Invalid asset name: {0}")]
    InvalidAsset(String),

    #[error("Encoding {encoding_id} ended in error state")]
    JobFailed {
        encoding_id: String,
        /// ERROR-severity task messages, in original order
        messages: Vec<String>,
    },

    #[error("Missing required setting: {0}")]
    MissingConfig(&'static str),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EncoderError {
    pub fn invalid_asset(msg: impl Into<String>) -> Self {
        Self::InvalidAsset(msg.into())
    }
}
