//! Storage-change trigger.
//!
//! Invoked when a new source object lands in the input bucket. Submits
//! the full rendition ladder; completion is driven by the service's
//! webhook, so the handler answers as soon as the encoding has started.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::error;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Storage-change event payload.
#[derive(Debug, Deserialize, Validate)]
pub struct StorageEvent {
    /// Name of the uploaded object
    #[validate(length(min = 1, message = "asset name must not be empty"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct EncodeResponse {
    pub encoding_id: String,
    pub asset: String,
}

/// Handle a storage-change event by submitting an encoding.
pub async fn storage_object_finalized(
    State(state): State<AppState>,
    Json(event): Json<StorageEvent>,
) -> ApiResult<(StatusCode, Json<EncodeResponse>)> {
    event.validate().map_err(|e| ApiError::validation(e.to_string()))?;

    let submission = state.pipeline.submit(&event.name).await?;

    // Supervise completion in the background; the finished webhook is the
    // durable path to manifest generation.
    let pipeline = Arc::clone(&state.pipeline);
    let encoding_id = submission.encoding_id.clone();
    tokio::spawn(async move {
        let cancel = CancellationToken::new();
        if let Err(e) = pipeline.await_finished(&encoding_id, &cancel).await {
            error!(encoding_id = %encoding_id, "encoding did not finish cleanly: {e}");
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(EncodeResponse { encoding_id: submission.encoding_id, asset: submission.asset }),
    ))
}
