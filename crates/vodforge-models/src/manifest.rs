//! Manifest kinds for adaptive playback.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::muxing::ContainerFormat;

/// Adaptive-streaming manifest flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    Hls,
    Dash,
}

impl ManifestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestKind::Hls => "hls",
            ManifestKind::Dash => "dash",
        }
    }

    /// File extension of the generated playlist (`m3u8` / `mpd`).
    pub fn file_extension(&self) -> &'static str {
        match self {
            ManifestKind::Hls => "m3u8",
            ManifestKind::Dash => "mpd",
        }
    }

    /// Container format whose muxings feed this manifest: HLS consumes TS
    /// segments, DASH consumes fragmented MP4.
    pub fn container(&self) -> ContainerFormat {
        match self {
            ManifestKind::Hls => ContainerFormat::Ts,
            ManifestKind::Dash => ContainerFormat::Mp4,
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
