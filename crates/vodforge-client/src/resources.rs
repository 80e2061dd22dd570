//! Storage resource and webhook operations.

use tracing::debug;

use crate::client::EncodingClient;
use crate::error::ClientResult;
use crate::types::{
    GcsInputRequest, GcsOutputRequest, ListResponse, StorageResource, Webhook, WebhookMethod,
    WebhookRequest,
};

impl EncodingClient {
    /// Create a resource representing the GCS bucket encodings read from.
    pub async fn create_gcs_input(&self, request: &GcsInputRequest) -> ClientResult<StorageResource> {
        self.post_json("encoding/inputs/gcs", request).await
    }

    /// Create a resource representing the GCS bucket artifacts are written to.
    pub async fn create_gcs_output(
        &self,
        request: &GcsOutputRequest,
    ) -> ClientResult<StorageResource> {
        self.post_json("encoding/outputs/gcs", request).await
    }

    /// Look up an input resource by its unique name.
    pub async fn find_input_by_name(&self, name: &str) -> ClientResult<Option<StorageResource>> {
        let page: ListResponse<StorageResource> =
            self.get_json_query("encoding/inputs/gcs", &[("name", name)]).await?;
        Ok(page.items.into_iter().next())
    }

    /// Look up an output resource by its unique name.
    pub async fn find_output_by_name(&self, name: &str) -> ClientResult<Option<StorageResource>> {
        let page: ListResponse<StorageResource> =
            self.get_json_query("encoding/outputs/gcs", &[("name", name)]).await?;
        Ok(page.items.into_iter().next())
    }

    /// Reuse an existing named input resource, or create a new one.
    pub async fn ensure_input(
        &self,
        request: &GcsInputRequest,
        reuse_existing: bool,
    ) -> ClientResult<StorageResource> {
        if reuse_existing {
            if let Some(existing) = self.find_input_by_name(&request.name).await? {
                debug!(input_id = %existing.id, "reusing existing input resource");
                return Ok(existing);
            }
        }
        self.create_gcs_input(request).await
    }

    /// Reuse an existing named output resource, or create a new one.
    pub async fn ensure_output(
        &self,
        request: &GcsOutputRequest,
        reuse_existing: bool,
    ) -> ClientResult<StorageResource> {
        if reuse_existing {
            if let Some(existing) = self.find_output_by_name(&request.name).await? {
                debug!(output_id = %existing.id, "reusing existing output resource");
                return Ok(existing);
            }
        }
        self.create_gcs_output(request).await
    }

    /// Register a webhook fired when the encoding finishes successfully.
    pub async fn register_finished_webhook(
        &self,
        encoding_id: &str,
        url: &str,
    ) -> ClientResult<Webhook> {
        let request = WebhookRequest { url: url.to_string(), method: WebhookMethod::Post };
        self.post_json(
            &format!("notifications/webhooks/encoding/encodings/{encoding_id}/finished"),
            &request,
        )
        .await
    }
}
