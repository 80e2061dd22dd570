//! Request and response types for the encoding service API.

use serde::{Deserialize, Serialize};
use vodforge_models::{H264Profile, MuxingRecord};

// ============================================================================
// Encodings
// ============================================================================

/// Request to create an encoding.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cloud_region: String,
    /// External infrastructure to run the encoding on, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infrastructure_id: Option<String>,
}

/// An encoding resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    pub id: String,
    pub name: String,
}

// ============================================================================
// Codec configurations
// ============================================================================

/// Quality preset applied to codec configurations.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresetConfiguration {
    VodStandard,
}

/// H.264 codec configuration request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct H264ConfigurationRequest {
    pub name: String,
    pub preset_configuration: PresetConfiguration,
    pub height: u32,
    pub width: u32,
    pub bitrate: u64,
    pub profile: H264Profile,
}

/// AAC codec configuration request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AacConfigurationRequest {
    pub name: String,
    pub bitrate: u64,
}

/// A created codec configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecConfiguration {
    pub id: String,
}

// ============================================================================
// Streams
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamInput {
    pub input_id: String,
    pub input_path: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRequest {
    pub input_streams: Vec<StreamInput>,
    pub codec_config_id: String,
}

/// A created stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: String,
}

// ============================================================================
// Outputs attached to muxings and manifests
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AclPermission {
    PublicRead,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AclEntry {
    pub permission: AclPermission,
}

/// Where the artifacts of a muxing or manifest are written.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingOutput {
    pub output_id: String,
    pub output_path: String,
    pub acl: Vec<AclEntry>,
}

impl EncodingOutput {
    /// Output with public-read permissions, so artifacts are directly
    /// reachable over HTTP.
    pub fn public(output_id: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            output_id: output_id.into(),
            output_path: output_path.into(),
            acl: vec![AclEntry { permission: AclPermission::PublicRead }],
        }
    }
}

// ============================================================================
// Muxings
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MuxingStream {
    pub stream_id: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FragmentedMp4ManifestType {
    DashOnDemand,
}

/// Fragmented MP4 muxing request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mp4MuxingRequest {
    pub filename: String,
    /// Fragment duration in milliseconds
    pub fragment_duration: u32,
    pub fragmented_mp4_muxing_manifest_type: FragmentedMp4ManifestType,
    pub streams: Vec<MuxingStream>,
    pub outputs: Vec<EncodingOutput>,
}

impl Mp4MuxingRequest {
    pub fn fragmented(
        filename: impl Into<String>,
        fragment_duration: u32,
        stream_id: impl Into<String>,
        output: EncodingOutput,
    ) -> Self {
        Self {
            filename: filename.into(),
            fragment_duration,
            fragmented_mp4_muxing_manifest_type: FragmentedMp4ManifestType::DashOnDemand,
            streams: vec![MuxingStream { stream_id: stream_id.into() }],
            outputs: vec![output],
        }
    }
}

/// TS muxing request producing segments for adaptive streaming.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TsMuxingRequest {
    /// Segment length in seconds
    pub segment_length: f64,
    pub streams: Vec<MuxingStream>,
    pub outputs: Vec<EncodingOutput>,
}

impl TsMuxingRequest {
    pub fn segmented(
        segment_length: f64,
        stream_id: impl Into<String>,
        output: EncodingOutput,
    ) -> Self {
        Self {
            segment_length,
            streams: vec![MuxingStream { stream_id: stream_id.into() }],
            outputs: vec![output],
        }
    }
}

/// A muxing as returned by the service, with its stream and output
/// references still nested.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuxingDetails {
    pub id: String,
    #[serde(default)]
    pub streams: Vec<MuxingStreamRef>,
    #[serde(default)]
    pub outputs: Vec<MuxingOutputRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuxingStreamRef {
    pub stream_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuxingOutputRef {
    pub output_id: String,
    pub output_path: String,
}

impl MuxingDetails {
    /// Flatten to a [`MuxingRecord`] over the first stream and output.
    /// Returns `None` for muxings with no stream or no output attached.
    pub fn into_record(self) -> Option<MuxingRecord> {
        let stream = self.streams.into_iter().next()?;
        let output = self.outputs.into_iter().next()?;
        Some(MuxingRecord {
            id: self.id,
            stream_id: stream.stream_id,
            output_id: output.output_id,
            output_path: output.output_path,
        })
    }
}

// ============================================================================
// Storage resources and webhooks
// ============================================================================

/// Request to create a GCS input bucket resource.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcsInputRequest {
    pub name: String,
    pub bucket_name: String,
    pub access_key: String,
    pub secret_key: String,
}

/// Request to create a GCS output bucket resource.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcsOutputRequest {
    pub name: String,
    pub bucket_name: String,
    pub access_key: String,
    pub secret_key: String,
}

/// A created input or output storage resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageResource {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebhookMethod {
    Post,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    pub url: String,
    pub method: WebhookMethod,
}

/// A registered webhook.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: String,
}

// ============================================================================
// Manifests
// ============================================================================

/// HLS manifest creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HlsManifestRequest {
    /// File name of the playlist, e.g. `master.m3u8`
    pub manifest_name: String,
    pub name: String,
    pub outputs: Vec<EncodingOutput>,
}

/// HLS audio media entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMediaInfoRequest {
    pub name: String,
    pub group_id: String,
    pub language: String,
    pub segment_path: String,
    pub encoding_id: String,
    pub stream_id: String,
    pub muxing_id: String,
    pub uri: String,
}

/// HLS variant stream entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamInfoRequest {
    pub name: String,
    pub audio: String,
    pub closed_captions: String,
    pub segment_path: String,
    pub uri: String,
    pub encoding_id: String,
    pub stream_id: String,
    pub muxing_id: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashProfile {
    OnDemand,
}

/// DASH manifest creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashManifestRequest {
    /// File name of the manifest, e.g. `stream.mpd`
    pub manifest_name: String,
    pub name: String,
    pub profile: DashProfile,
    pub outputs: Vec<EncodingOutput>,
}

/// Empty body for period creation.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodRequest {}

/// Empty body for video adaptation set creation.
#[derive(Debug, Clone, Serialize)]
pub struct VideoAdaptationSetRequest {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioAdaptationSetRequest {
    pub lang: String,
}

/// DASH MP4 representation entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashRepresentationRequest {
    pub encoding_id: String,
    pub muxing_id: String,
    pub file_path: String,
}

/// A created manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
}

/// Generic created-resource response for manifest components.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResource {
    pub id: String,
}

/// A page of listed resources.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
}
