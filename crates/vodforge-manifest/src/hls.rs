//! HLS manifest builder over TS muxings.

use async_trait::async_trait;

use vodforge_client::types::{AudioMediaInfoRequest, EncodingOutput, HlsManifestRequest, StreamInfoRequest};
use vodforge_client::{ClientResult, EncodingClient};
use vodforge_models::{ManifestKind, TaskStatus};

use crate::builder::{ManifestBuilder, ManifestLayout, ManifestScaffold};
use crate::classify::{join_media_file, relative_path};

pub struct HlsManifestBuilder {
    client: EncodingClient,
}

impl HlsManifestBuilder {
    pub fn new(client: EncodingClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManifestBuilder for HlsManifestBuilder {
    fn kind(&self) -> ManifestKind {
        ManifestKind::Hls
    }

    async fn create(&self, layout: &ManifestLayout) -> ClientResult<ManifestScaffold> {
        let request = HlsManifestRequest {
            manifest_name: format!("{}.{}", layout.manifest_name, self.kind().file_extension()),
            name: format!("HLS manifest for encoding {}", layout.encoding_id),
            outputs: vec![EncodingOutput::public(&layout.output_id, &layout.output_root)],
        };
        let manifest = self.client.create_hls_manifest(&request).await?;
        Ok(ManifestScaffold { manifest_id: manifest.id, dash: None })
    }

    async fn add_components(
        &self,
        scaffold: &ManifestScaffold,
        layout: &ManifestLayout,
    ) -> ClientResult<()> {
        for muxing in &layout.muxings.audio {
            let relative = relative_path(&muxing.output_path, &layout.output_root);
            let request = AudioMediaInfoRequest {
                name: format!("Audio media info for muxing {}", muxing.id),
                group_id: "audio".to_string(),
                language: layout.audio_language.clone(),
                segment_path: String::new(),
                encoding_id: layout.encoding_id.clone(),
                stream_id: muxing.stream_id.clone(),
                muxing_id: muxing.id.clone(),
                uri: join_media_file(relative, "audio.m3u8"),
            };
            self.client.add_hls_audio_media(&scaffold.manifest_id, &request).await?;
        }

        for muxing in &layout.muxings.video {
            let relative = relative_path(&muxing.output_path, &layout.output_root);
            let request = StreamInfoRequest {
                name: format!("Stream info for muxing {}", muxing.id),
                audio: "audio".to_string(),
                closed_captions: "NONE".to_string(),
                segment_path: String::new(),
                uri: join_media_file(relative, "video.m3u8"),
                encoding_id: layout.encoding_id.clone(),
                stream_id: muxing.stream_id.clone(),
                muxing_id: muxing.id.clone(),
            };
            self.client.add_hls_stream_info(&scaffold.manifest_id, &request).await?;
        }

        Ok(())
    }

    async fn start(&self, manifest_id: &str) -> ClientResult<()> {
        self.client.start_manifest(ManifestKind::Hls, manifest_id).await
    }

    async fn status(&self, manifest_id: &str) -> ClientResult<TaskStatus> {
        self.client.manifest_status(ManifestKind::Hls, manifest_id).await
    }
}
