//! DASH manifest builder over fragmented MP4 muxings.

use async_trait::async_trait;

use vodforge_client::types::{DashManifestRequest, DashProfile, DashRepresentationRequest, EncodingOutput};
use vodforge_client::{ClientError, ClientResult, EncodingClient};
use vodforge_models::{ManifestKind, TaskStatus};

use crate::builder::{DashScaffold, ManifestBuilder, ManifestLayout, ManifestScaffold};
use crate::classify::{join_media_file, relative_path};

pub struct DashManifestBuilder {
    client: EncodingClient,
}

impl DashManifestBuilder {
    pub fn new(client: EncodingClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManifestBuilder for DashManifestBuilder {
    fn kind(&self) -> ManifestKind {
        ManifestKind::Dash
    }

    async fn create(&self, layout: &ManifestLayout) -> ClientResult<ManifestScaffold> {
        let request = DashManifestRequest {
            manifest_name: format!("{}.{}", layout.manifest_name, self.kind().file_extension()),
            name: format!("DASH manifest for encoding {}", layout.encoding_id),
            profile: DashProfile::OnDemand,
            outputs: vec![EncodingOutput::public(&layout.output_id, &layout.output_root)],
        };
        let manifest = self.client.create_dash_manifest(&request).await?;

        let period = self.client.create_dash_period(&manifest.id).await?;
        let video_set = self.client.create_video_adaptation_set(&manifest.id, &period.id).await?;
        let audio_set = self
            .client
            .create_audio_adaptation_set(&manifest.id, &period.id, &layout.audio_language)
            .await?;

        Ok(ManifestScaffold {
            manifest_id: manifest.id,
            dash: Some(DashScaffold {
                period_id: period.id,
                video_adaptation_set_id: video_set.id,
                audio_adaptation_set_id: audio_set.id,
            }),
        })
    }

    async fn add_components(
        &self,
        scaffold: &ManifestScaffold,
        layout: &ManifestLayout,
    ) -> ClientResult<()> {
        let dash = scaffold
            .dash
            .as_ref()
            .ok_or_else(|| ClientError::InvalidResponse("DASH scaffold without period ids".into()))?;

        for muxing in &layout.muxings.audio {
            let relative = relative_path(&muxing.output_path, &layout.output_root);
            let request = DashRepresentationRequest {
                encoding_id: layout.encoding_id.clone(),
                muxing_id: muxing.id.clone(),
                file_path: join_media_file(relative, "audio.mp4"),
            };
            self.client
                .add_dash_mp4_representation(
                    &scaffold.manifest_id,
                    &dash.period_id,
                    &dash.audio_adaptation_set_id,
                    &request,
                )
                .await?;
        }

        for muxing in &layout.muxings.video {
            let relative = relative_path(&muxing.output_path, &layout.output_root);
            let request = DashRepresentationRequest {
                encoding_id: layout.encoding_id.clone(),
                muxing_id: muxing.id.clone(),
                file_path: join_media_file(relative, "video.mp4"),
            };
            self.client
                .add_dash_mp4_representation(
                    &scaffold.manifest_id,
                    &dash.period_id,
                    &dash.video_adaptation_set_id,
                    &request,
                )
                .await?;
        }

        Ok(())
    }

    async fn start(&self, manifest_id: &str) -> ClientResult<()> {
        self.client.start_manifest(ManifestKind::Dash, manifest_id).await
    }

    async fn status(&self, manifest_id: &str) -> ClientResult<TaskStatus> {
        self.client.manifest_status(ManifestKind::Dash, manifest_id).await
    }
}
