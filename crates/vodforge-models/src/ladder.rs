//! Rendition ladder definitions.
//!
//! The ladders are fixed tables: seven H.264 video tiers from 1080p down
//! to 216p and four AAC audio tiers from 256 kbit/s down to 64 kbit/s.
//! Ladder order defines both submission order and the insertion order of
//! manifest entries, so it must stay stable.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// H.264 profile applied to a video rendition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum H264Profile {
    High,
    Main,
    Baseline,
}

impl H264Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            H264Profile::High => "HIGH",
            H264Profile::Main => "MAIN",
            H264Profile::Baseline => "BASELINE",
        }
    }
}

impl fmt::Display for H264Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One video tier of the encoding ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoRendition {
    /// Output height in pixels
    pub height: u32,
    /// Output width in pixels
    pub width: u32,
    /// Target bitrate in bit/s
    pub bitrate: u64,
    /// H.264 profile for this tier
    pub profile: H264Profile,
}

impl VideoRendition {
    /// Label used for the remote codec configuration name.
    pub fn label(&self) -> String {
        format!("H.264 {}p {} kbit/s", self.height, self.bitrate / 1000)
    }

    /// Path segment identifying this tier, e.g. `1080-1980-3500000`.
    pub fn path_segment(&self) -> String {
        format!("{}-{}-{}", self.height, self.width, self.bitrate)
    }
}

/// One audio tier of the encoding ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AudioRendition {
    /// Target bitrate in bit/s
    pub bitrate: u64,
}

impl AudioRendition {
    /// Label used for the remote codec configuration name.
    pub fn label(&self) -> String {
        format!("AAC {} kbit/s", self.bitrate / 1000)
    }

    /// Path segment identifying this tier, e.g. `128000`.
    pub fn path_segment(&self) -> String {
        self.bitrate.to_string()
    }
}

const VIDEO_LADDER: [VideoRendition; 7] = [
    VideoRendition { height: 1080, width: 1980, bitrate: 3_500_000, profile: H264Profile::High },
    VideoRendition { height: 720, width: 1280, bitrate: 2_000_000, profile: H264Profile::High },
    VideoRendition { height: 720, width: 1280, bitrate: 1_200_000, profile: H264Profile::Main },
    VideoRendition { height: 540, width: 960, bitrate: 900_000, profile: H264Profile::Main },
    VideoRendition { height: 360, width: 640, bitrate: 664_000, profile: H264Profile::Baseline },
    VideoRendition { height: 288, width: 512, bitrate: 412_000, profile: H264Profile::Baseline },
    VideoRendition { height: 216, width: 384, bitrate: 224_000, profile: H264Profile::Baseline },
];

const AUDIO_LADDER: [AudioRendition; 4] = [
    AudioRendition { bitrate: 256_000 },
    AudioRendition { bitrate: 128_000 },
    AudioRendition { bitrate: 96_000 },
    AudioRendition { bitrate: 64_000 },
];

/// The fixed video ladder, highest tier first.
pub fn video_ladder() -> &'static [VideoRendition] {
    &VIDEO_LADDER
}

/// The fixed audio ladder, highest tier first.
pub fn audio_ladder() -> &'static [AudioRendition] {
    &AUDIO_LADDER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_ladder_shape() {
        let ladder = video_ladder();
        assert_eq!(ladder.len(), 7);

        // Top and bottom tiers pin the documented range
        assert_eq!(ladder[0].height, 1080);
        assert_eq!(ladder[0].width, 1980);
        assert_eq!(ladder[0].bitrate, 3_500_000);
        assert_eq!(ladder[0].profile, H264Profile::High);
        assert_eq!(ladder[6].height, 216);
        assert_eq!(ladder[6].bitrate, 224_000);
        assert_eq!(ladder[6].profile, H264Profile::Baseline);

        // Bitrates strictly descend
        for pair in ladder.windows(2) {
            assert!(pair[0].bitrate > pair[1].bitrate);
        }
    }

    #[test]
    fn test_audio_ladder_shape() {
        let ladder = audio_ladder();
        assert_eq!(ladder.len(), 4);
        assert_eq!(ladder[0].bitrate, 256_000);
        assert_eq!(ladder[3].bitrate, 64_000);
        for pair in ladder.windows(2) {
            assert!(pair[0].bitrate > pair[1].bitrate);
        }
    }

    #[test]
    fn test_ladders_are_deterministic() {
        assert_eq!(video_ladder(), video_ladder());
        assert_eq!(audio_ladder(), audio_ladder());
    }

    #[test]
    fn test_labels_and_path_segments() {
        let top = video_ladder()[0];
        assert_eq!(top.label(), "H.264 1080p 3500 kbit/s");
        assert_eq!(top.path_segment(), "1080-1980-3500000");

        let audio = audio_ladder()[1];
        assert_eq!(audio.label(), "AAC 128 kbit/s");
        assert_eq!(audio.path_segment(), "128000");
    }

    #[test]
    fn test_profile_wire_format() {
        let json = serde_json::to_string(&H264Profile::Baseline).unwrap();
        assert_eq!(json, "\"BASELINE\"");
    }
}
