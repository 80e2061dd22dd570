//! Encoding, codec configuration, stream and muxing operations.

use tracing::debug;

use vodforge_models::{AudioRendition, ContainerFormat, MuxingRecord, TaskStatus, VideoRendition};

use crate::client::EncodingClient;
use crate::error::{ClientError, ClientResult};
use crate::types::{
    AacConfigurationRequest, CodecConfiguration, Encoding, EncodingRequest,
    H264ConfigurationRequest, ListResponse, Mp4MuxingRequest, MuxingDetails, PresetConfiguration,
    Stream, StreamInput, StreamRequest, TsMuxingRequest,
};

impl EncodingClient {
    /// Create an encoding, the base object all streams and muxings hang off.
    pub async fn create_encoding(&self, request: &EncodingRequest) -> ClientResult<Encoding> {
        self.post_json("encoding/encodings", request).await
    }

    /// Create a VOD-preset H.264 codec configuration for one video tier.
    pub async fn create_h264_configuration(
        &self,
        rendition: &VideoRendition,
    ) -> ClientResult<CodecConfiguration> {
        let request = H264ConfigurationRequest {
            name: rendition.label(),
            preset_configuration: PresetConfiguration::VodStandard,
            height: rendition.height,
            width: rendition.width,
            bitrate: rendition.bitrate,
            profile: rendition.profile,
        };
        self.post_json("encoding/configurations/video/h264", &request).await
    }

    /// Create an AAC codec configuration for one audio tier.
    pub async fn create_aac_configuration(
        &self,
        rendition: &AudioRendition,
    ) -> ClientResult<CodecConfiguration> {
        let request = AacConfigurationRequest { name: rendition.label(), bitrate: rendition.bitrate };
        self.post_json("encoding/configurations/audio/aac", &request).await
    }

    /// Add a stream reading `input_path` with the given codec configuration.
    pub async fn create_stream(
        &self,
        encoding_id: &str,
        input_id: &str,
        input_path: &str,
        codec_configuration_id: &str,
    ) -> ClientResult<Stream> {
        let request = StreamRequest {
            input_streams: vec![StreamInput {
                input_id: input_id.to_string(),
                input_path: input_path.to_string(),
            }],
            codec_config_id: codec_configuration_id.to_string(),
        };
        self.post_json(&format!("encoding/encodings/{encoding_id}/streams"), &request).await
    }

    /// Create a fragmented MP4 muxing.
    pub async fn create_mp4_muxing(
        &self,
        encoding_id: &str,
        request: &Mp4MuxingRequest,
    ) -> ClientResult<MuxingRecord> {
        let details: MuxingDetails = self
            .post_json(&format!("encoding/encodings/{encoding_id}/muxings/mp4"), request)
            .await?;
        details
            .into_record()
            .ok_or_else(|| ClientError::InvalidResponse("muxing created without stream or output".into()))
    }

    /// Create a TS muxing producing segments for adaptive streaming.
    pub async fn create_ts_muxing(
        &self,
        encoding_id: &str,
        request: &TsMuxingRequest,
    ) -> ClientResult<MuxingRecord> {
        let details: MuxingDetails = self
            .post_json(&format!("encoding/encodings/{encoding_id}/muxings/ts"), request)
            .await?;
        details
            .into_record()
            .ok_or_else(|| ClientError::InvalidResponse("muxing created without stream or output".into()))
    }

    /// List the muxings of one container format, flattened to records.
    /// Muxings without an output attached are skipped.
    pub async fn list_muxings(
        &self,
        encoding_id: &str,
        container: ContainerFormat,
    ) -> ClientResult<Vec<MuxingRecord>> {
        let page: ListResponse<MuxingDetails> = self
            .get_json(&format!(
                "encoding/encodings/{encoding_id}/muxings/{}",
                container.as_str()
            ))
            .await?;

        let mut records = Vec::with_capacity(page.items.len());
        for details in page.items {
            let muxing_id = details.id.clone();
            match details.into_record() {
                Some(record) => records.push(record),
                None => debug!(muxing_id = %muxing_id, "skipping muxing without stream or output"),
            }
        }
        Ok(records)
    }

    /// Start the encoding job.
    pub async fn start_encoding(&self, encoding_id: &str) -> ClientResult<()> {
        self.post_no_content(&format!("encoding/encodings/{encoding_id}/start")).await
    }

    /// Fetch the current status snapshot of an encoding job.
    pub async fn encoding_status(&self, encoding_id: &str) -> ClientResult<TaskStatus> {
        self.get_json(&format!("encoding/encodings/{encoding_id}/status")).await
    }
}
