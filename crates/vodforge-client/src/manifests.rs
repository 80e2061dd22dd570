//! HLS and DASH manifest operations.

use vodforge_models::{ManifestKind, TaskStatus};

use crate::client::EncodingClient;
use crate::error::ClientResult;
use crate::types::{
    AudioAdaptationSetRequest, AudioMediaInfoRequest, CreatedResource, DashManifestRequest,
    DashRepresentationRequest, HlsManifestRequest, Manifest, PeriodRequest, StreamInfoRequest,
    VideoAdaptationSetRequest,
};

impl EncodingClient {
    /// Create an HLS manifest shell.
    pub async fn create_hls_manifest(&self, request: &HlsManifestRequest) -> ClientResult<Manifest> {
        self.post_json("encoding/manifests/hls", request).await
    }

    /// Add an audio media entry to an HLS manifest.
    pub async fn add_hls_audio_media(
        &self,
        manifest_id: &str,
        request: &AudioMediaInfoRequest,
    ) -> ClientResult<CreatedResource> {
        self.post_json(&format!("encoding/manifests/hls/{manifest_id}/media/audio"), request)
            .await
    }

    /// Add a variant stream entry to an HLS manifest.
    pub async fn add_hls_stream_info(
        &self,
        manifest_id: &str,
        request: &StreamInfoRequest,
    ) -> ClientResult<CreatedResource> {
        self.post_json(&format!("encoding/manifests/hls/{manifest_id}/streams"), request).await
    }

    /// Create a DASH manifest shell.
    pub async fn create_dash_manifest(
        &self,
        request: &DashManifestRequest,
    ) -> ClientResult<Manifest> {
        self.post_json("encoding/manifests/dash", request).await
    }

    /// Add a period to a DASH manifest.
    pub async fn create_dash_period(&self, manifest_id: &str) -> ClientResult<CreatedResource> {
        self.post_json(&format!("encoding/manifests/dash/{manifest_id}/periods"), &PeriodRequest {})
            .await
    }

    /// Add a video adaptation set to a DASH period.
    pub async fn create_video_adaptation_set(
        &self,
        manifest_id: &str,
        period_id: &str,
    ) -> ClientResult<CreatedResource> {
        self.post_json(
            &format!("encoding/manifests/dash/{manifest_id}/periods/{period_id}/adaptationsets/video"),
            &VideoAdaptationSetRequest {},
        )
        .await
    }

    /// Add an audio adaptation set to a DASH period.
    pub async fn create_audio_adaptation_set(
        &self,
        manifest_id: &str,
        period_id: &str,
        lang: &str,
    ) -> ClientResult<CreatedResource> {
        self.post_json(
            &format!("encoding/manifests/dash/{manifest_id}/periods/{period_id}/adaptationsets/audio"),
            &AudioAdaptationSetRequest { lang: lang.to_string() },
        )
        .await
    }

    /// Add an MP4 representation to a DASH adaptation set.
    pub async fn add_dash_mp4_representation(
        &self,
        manifest_id: &str,
        period_id: &str,
        adaptation_set_id: &str,
        request: &DashRepresentationRequest,
    ) -> ClientResult<CreatedResource> {
        self.post_json(
            &format!(
                "encoding/manifests/dash/{manifest_id}/periods/{period_id}/adaptationsets/{adaptation_set_id}/representations/mp4"
            ),
            request,
        )
        .await
    }

    /// Start a manifest generation job.
    pub async fn start_manifest(&self, kind: ManifestKind, manifest_id: &str) -> ClientResult<()> {
        self.post_no_content(&format!("encoding/manifests/{}/{manifest_id}/start", kind.as_str()))
            .await
    }

    /// Fetch the current status snapshot of a manifest generation job.
    pub async fn manifest_status(
        &self,
        kind: ManifestKind,
        manifest_id: &str,
    ) -> ClientResult<TaskStatus> {
        self.get_json(&format!("encoding/manifests/{}/{manifest_id}/status", kind.as_str())).await
    }
}
