//! Muxing records returned by the encoding service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Container format of a muxing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    /// Fragmented MP4
    Mp4,
    /// MPEG-2 transport stream segments
    Ts,
}

impl ContainerFormat {
    /// Segment used in output paths and API routes (`mp4` / `ts`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "mp4",
            ContainerFormat::Ts => "ts",
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One muxing of an encoding, as listed by the service. Produced remotely,
/// never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MuxingRecord {
    /// Muxing identifier
    pub id: String,
    /// Stream packaged by this muxing
    pub stream_id: String,
    /// Output resource the artifacts were written to
    pub output_id: String,
    /// Absolute output path on the output resource
    pub output_path: String,
}
