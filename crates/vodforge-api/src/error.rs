//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use vodforge_encoder::EncoderError;
use vodforge_manifest::ManifestError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Encoder error: {0}")]
    Encoder(#[from] EncoderError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Encoder(EncoderError::InvalidAsset(_)) => StatusCode::BAD_REQUEST,
            // Upstream encoding-service failures
            ApiError::Encoder(EncoderError::JobFailed { .. })
            | ApiError::Encoder(EncoderError::Client(_))
            | ApiError::Manifest(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) | ApiError::Encoder(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let detail = match &self {
            ApiError::Internal(_) | ApiError::Encoder(_) | ApiError::Manifest(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::validation("missing encoding id").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::unauthorized("bad signature").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Encoder(EncoderError::InvalidAsset("empty".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Encoder(EncoderError::JobFailed {
                encoding_id: "enc-1".into(),
                messages: vec![]
            })
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
