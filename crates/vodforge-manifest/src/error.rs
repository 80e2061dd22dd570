//! Manifest generation error types.

use thiserror::Error;

use vodforge_client::ClientError;
use vodforge_models::ManifestKind;

pub type ManifestResult<T> = Result<T, ManifestError>;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Encoding {0} has no video muxings to anchor the manifest on")]
    NoVideoMuxings(String),

    #[error("Output path {0} lacks a /video segment")]
    InvalidOutputPath(String),

    #[error("{kind} manifest {manifest_id} ended in error state")]
    JobFailed {
        kind: ManifestKind,
        manifest_id: String,
        /// ERROR-severity task messages, in original order
        messages: Vec<String>,
    },

    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}
