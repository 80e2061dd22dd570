//! Manifest generation orchestration.

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use vodforge_client::{await_completion, EncodingClient, PollConfig};
use vodforge_models::{JobStatus, ManifestKind};

use crate::builder::{ManifestBuilder, ManifestLayout};
use crate::classify::{classify_muxings, derive_output_root};
use crate::dash::DashManifestBuilder;
use crate::error::{ManifestError, ManifestResult};
use crate::hls::HlsManifestBuilder;

/// Manifest generation configuration.
#[derive(Debug, Clone)]
pub struct ManifestConfig {
    /// HLS playlist file name without extension
    pub hls_manifest_name: String,
    /// DASH manifest file name without extension
    pub dash_manifest_name: String,
    /// Language tag for audio entries
    pub audio_language: String,
    /// Polling behaviour for manifest generation jobs
    pub poll: PollConfig,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            hls_manifest_name: "hls-manifest".to_string(),
            dash_manifest_name: "dash-manifest".to_string(),
            audio_language: "eng".to_string(),
            poll: PollConfig::default().with_deadline(Duration::from_secs(1800)),
        }
    }
}

impl ManifestConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            hls_manifest_name: std::env::var("MANIFEST_HLS_NAME")
                .unwrap_or(defaults.hls_manifest_name),
            dash_manifest_name: std::env::var("MANIFEST_DASH_NAME")
                .unwrap_or(defaults.dash_manifest_name),
            audio_language: std::env::var("MANIFEST_AUDIO_LANGUAGE")
                .unwrap_or(defaults.audio_language),
            poll: PollConfig::new(Duration::from_secs(
                std::env::var("MANIFEST_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ))
            .with_deadline(Duration::from_secs(
                std::env::var("MANIFEST_POLL_DEADLINE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1800),
            )),
        }
    }
}

/// Manifest ids produced by [`ManifestGenerator::generate_all`].
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedManifests {
    pub hls: String,
    pub dash: String,
}

/// Generates manifests for a finished encoding.
pub struct ManifestGenerator {
    client: EncodingClient,
    config: ManifestConfig,
}

impl ManifestGenerator {
    pub fn new(client: EncodingClient, config: ManifestConfig) -> Self {
        Self { client, config }
    }

    /// Generate one manifest flavor and wait for the remote job.
    /// Returns the manifest id.
    pub async fn generate(
        &self,
        encoding_id: &str,
        kind: ManifestKind,
        cancel: &CancellationToken,
    ) -> ManifestResult<String> {
        let layout = self.prepare_layout(encoding_id, kind).await?;

        match kind {
            ManifestKind::Hls => {
                self.run(&HlsManifestBuilder::new(self.client.clone()), &layout, cancel).await
            }
            ManifestKind::Dash => {
                self.run(&DashManifestBuilder::new(self.client.clone()), &layout, cancel).await
            }
        }
    }

    /// Generate HLS then DASH, in that order, so the output layout stays
    /// reproducible.
    pub async fn generate_all(
        &self,
        encoding_id: &str,
        cancel: &CancellationToken,
    ) -> ManifestResult<GeneratedManifests> {
        let hls = self.generate(encoding_id, ManifestKind::Hls, cancel).await?;
        let dash = self.generate(encoding_id, ManifestKind::Dash, cancel).await?;
        Ok(GeneratedManifests { hls, dash })
    }

    async fn prepare_layout(
        &self,
        encoding_id: &str,
        kind: ManifestKind,
    ) -> ManifestResult<ManifestLayout> {
        let muxings = self.client.list_muxings(encoding_id, kind.container()).await?;
        let classified = classify_muxings(muxings);

        let (output_id, output_root) = {
            let first = classified
                .video
                .first()
                .ok_or_else(|| ManifestError::NoVideoMuxings(encoding_id.to_string()))?;
            let root = derive_output_root(&first.output_path)
                .ok_or_else(|| ManifestError::InvalidOutputPath(first.output_path.clone()))?;
            (first.output_id.clone(), root.to_string())
        };

        // All muxings of one encoding are expected to share the anchor root
        for muxing in classified.video.iter().chain(classified.audio.iter()) {
            if !muxing.output_path.contains(&output_root) {
                warn!(
                    muxing_id = %muxing.id,
                    path = %muxing.output_path,
                    root = %output_root,
                    "muxing output path disagrees with the anchor output root"
                );
            }
        }

        let manifest_name = match kind {
            ManifestKind::Hls => self.config.hls_manifest_name.clone(),
            ManifestKind::Dash => self.config.dash_manifest_name.clone(),
        };

        Ok(ManifestLayout {
            encoding_id: encoding_id.to_string(),
            output_id,
            output_root,
            muxings: classified,
            manifest_name,
            audio_language: self.config.audio_language.clone(),
        })
    }

    async fn run<B: ManifestBuilder>(
        &self,
        builder: &B,
        layout: &ManifestLayout,
        cancel: &CancellationToken,
    ) -> ManifestResult<String> {
        let scaffold = builder.create(layout).await?;
        builder.add_components(&scaffold, layout).await?;
        builder.start(&scaffold.manifest_id).await?;

        info!(
            manifest_id = %scaffold.manifest_id,
            kind = %builder.kind(),
            encoding_id = %layout.encoding_id,
            "manifest job started"
        );

        let manifest_id = scaffold.manifest_id.as_str();
        let task = await_completion(|| builder.status(manifest_id), &self.config.poll, cancel)
            .await
            .map_err(ManifestError::Client)?;

        if task.status == JobStatus::Error {
            let messages: Vec<String> =
                task.error_messages().into_iter().map(str::to_string).collect();
            for message in &messages {
                error!(manifest_id = %scaffold.manifest_id, "manifest error: {message}");
            }
            return Err(ManifestError::JobFailed {
                kind: builder.kind(),
                manifest_id: scaffold.manifest_id,
                messages,
            });
        }

        info!(
            manifest_id = %scaffold.manifest_id,
            kind = %builder.kind(),
            "manifest finished"
        );
        Ok(scaffold.manifest_id)
    }
}
