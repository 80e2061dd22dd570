//! Encoding-finished webhook target.
//!
//! The encoding service calls this endpoint once an encoding reaches
//! FINISHED. The handler validates the event, then drives HLS and DASH
//! manifest generation for the named encoding.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use vodforge_manifest::GeneratedManifests;

use crate::error::{ApiError, ApiResult};
use crate::metrics::{record_manifests_generated, record_webhook_received};
use crate::signature::{verify_signature, SIGNATURE_HEADER};
use crate::state::AppState;

/// Event type announcing a successfully finished encoding.
pub const EVENT_ENCODING_FINISHED: &str = "ENCODING_FINISHED";

/// Inbound webhook payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingFinishedEvent {
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub encoding: Option<EncodingRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingRef {
    #[serde(default)]
    pub id: Option<String>,
}

impl EncodingFinishedEvent {
    /// The encoding id, when the event is a well-formed
    /// ENCODING_FINISHED notification. Anything else yields `None` and
    /// must be rejected by the caller.
    pub fn finished_encoding_id(&self) -> Option<&str> {
        match self.event_type.as_deref() {
            Some(EVENT_ENCODING_FINISHED) => self
                .encoding
                .as_ref()
                .and_then(|e| e.id.as_deref())
                .filter(|id| !id.is_empty()),
            _ => None,
        }
    }
}

/// Webhook response carrying the generated manifest ids.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub encoding_id: String,
    pub manifests: GeneratedManifests,
}

/// Handle an encoding-finished webhook.
pub async fn encoding_finished(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<WebhookResponse>> {
    if let Some(secret) = &state.config.webhook_secret {
        let provided = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("missing webhook signature"))?;
        if !verify_signature(secret, &body, provided) {
            return Err(ApiError::unauthorized("invalid webhook signature"));
        }
    }

    let event: EncodingFinishedEvent = serde_json::from_slice(&body)
        .map_err(|e| ApiError::validation(format!("malformed webhook payload: {e}")))?;

    let encoding_id = event
        .finished_encoding_id()
        .ok_or_else(|| ApiError::validation("missing encoding id or unexpected event type"))?
        .to_string();

    record_webhook_received();
    info!(encoding_id = %encoding_id, "encoding finished, generating manifests");

    let cancel = CancellationToken::new();
    let manifests = state.generator.generate_all(&encoding_id, &cancel).await?;
    record_manifests_generated();

    Ok(Json(WebhookResponse { encoding_id, manifests }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> EncodingFinishedEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_well_formed_event_yields_id() {
        let event = parse(r#"{"eventType":"ENCODING_FINISHED","encoding":{"id":"enc-1"}}"#);
        assert_eq!(event.finished_encoding_id(), Some("enc-1"));
    }

    #[test]
    fn test_wrong_event_type_yields_none() {
        let event = parse(r#"{"eventType":"ENCODING_ERROR","encoding":{"id":"enc-1"}}"#);
        assert_eq!(event.finished_encoding_id(), None);
    }

    #[test]
    fn test_missing_event_type_yields_none() {
        let event = parse(r#"{"encoding":{"id":"enc-1"}}"#);
        assert_eq!(event.finished_encoding_id(), None);
    }

    #[test]
    fn test_missing_or_empty_id_yields_none() {
        let event = parse(r#"{"eventType":"ENCODING_FINISHED"}"#);
        assert_eq!(event.finished_encoding_id(), None);

        let event = parse(r#"{"eventType":"ENCODING_FINISHED","encoding":{}}"#);
        assert_eq!(event.finished_encoding_id(), None);

        let event = parse(r#"{"eventType":"ENCODING_FINISHED","encoding":{"id":""}}"#);
        assert_eq!(event.finished_encoding_id(), None);
    }
}
