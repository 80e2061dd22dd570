//! Muxing classification and output-path derivation.
//!
//! Muxings carry no explicit media role; the role is encoded in the
//! output path layout the encode pipeline writes (`video/...` and
//! `audio/...` under a per-asset root). Classification and root
//! derivation are pure string operations over those paths.

use tracing::warn;

use vodforge_models::MuxingRecord;

/// Path marker identifying audio muxings.
pub const AUDIO_MARKER: &str = "/audio";
/// Path marker identifying video muxings.
pub const VIDEO_MARKER: &str = "/video";

/// Muxings of one encoding, split by media role. Input order is preserved
/// within each bucket.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedMuxings {
    pub video: Vec<MuxingRecord>,
    pub audio: Vec<MuxingRecord>,
}

/// Split muxings into audio and video by output-path marker.
///
/// A muxing whose path contains neither marker, or both, is ambiguous:
/// it is excluded from both buckets and logged, never guessed.
pub fn classify_muxings(muxings: Vec<MuxingRecord>) -> ClassifiedMuxings {
    let mut classified = ClassifiedMuxings::default();

    for muxing in muxings {
        let is_audio = muxing.output_path.contains(AUDIO_MARKER);
        let is_video = muxing.output_path.contains(VIDEO_MARKER);
        match (is_audio, is_video) {
            (true, false) => classified.audio.push(muxing),
            (false, true) => classified.video.push(muxing),
            _ => warn!(
                muxing_id = %muxing.id,
                path = %muxing.output_path,
                "ambiguous muxing output path, excluded from manifest"
            ),
        }
    }

    classified
}

/// Suffix of `full` after the first occurrence of `root`, with one
/// leading `/` stripped.
///
/// Returns `full` unchanged when `root` does not occur; re-applying with
/// the same root is then a no-op, so the operation is idempotent once
/// stripped.
pub fn relative_path<'a>(full: &'a str, root: &str) -> &'a str {
    match full.find(root) {
        Some(pos) => {
            let rest = &full[pos + root.len()..];
            rest.strip_prefix('/').unwrap_or(rest)
        }
        None => full,
    }
}

/// Common prefix before the first `/video` segment, shared by all
/// artifacts of one encoding. `None` when the marker is absent.
pub fn derive_output_root(path: &str) -> Option<&str> {
    path.find(VIDEO_MARKER).map(|pos| &path[..pos])
}

/// Join a relative muxing path with a media file name, inserting a
/// separator when the relative part does not already end with one.
pub fn join_media_file(relative: &str, file: &str) -> String {
    if relative.is_empty() || relative.ends_with('/') {
        format!("{relative}{file}")
    } else {
        format!("{relative}/{file}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn muxing(id: &str, output_path: &str) -> MuxingRecord {
        MuxingRecord {
            id: id.to_string(),
            stream_id: format!("stream-{id}"),
            output_id: "out-1".to_string(),
            output_path: output_path.to_string(),
        }
    }

    #[test]
    fn test_classification_is_exclusive() {
        let classified = classify_muxings(vec![
            muxing("v1", "outputs/clip.mp4/video/ts/clear/1080-1980-3500000"),
            muxing("a1", "outputs/clip.mp4/audio/ts/clear/128000"),
            muxing("v2", "outputs/clip.mp4/video/ts/clear/720-1280-2000000"),
        ]);

        assert_eq!(classified.video.len(), 2);
        assert_eq!(classified.audio.len(), 1);
        // Input order preserved within buckets
        assert_eq!(classified.video[0].id, "v1");
        assert_eq!(classified.video[1].id, "v2");
    }

    #[test]
    fn test_ambiguous_muxings_are_dropped() {
        let classified = classify_muxings(vec![
            muxing("both", "outputs/clip.mp4/video/of/the/audio/track"),
            muxing("neither", "outputs/clip.mp4/subtitles/en"),
        ]);

        assert!(classified.video.is_empty());
        assert!(classified.audio.is_empty());
    }

    #[test]
    fn test_relative_path_strips_root_and_separator() {
        let full = "outputs/clip.mp4/video/mp4/clear/1080-1980-3500000";
        assert_eq!(relative_path(full, "outputs/clip.mp4"), "video/mp4/clear/1080-1980-3500000");
    }

    #[test]
    fn test_relative_path_without_match_is_unchanged() {
        let full = "video/mp4/clear/1080-1980-3500000";
        assert_eq!(relative_path(full, "outputs/other.mp4"), full);
    }

    #[test]
    fn test_relative_path_is_idempotent_once_stripped() {
        let full = "outputs/clip.mp4/audio/mp4/clear/128000";
        let once = relative_path(full, "outputs/clip.mp4");
        let twice = relative_path(once, "outputs/clip.mp4");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_derive_output_root() {
        assert_eq!(derive_output_root("base/asset/video/mp4/x"), Some("base/asset"));
        assert_eq!(derive_output_root("base/asset/subtitles/en"), None);
    }

    #[test]
    fn test_top_tier_relative_media_path() {
        let full = "outputs/clip.mp4/video/mp4/clear/1080-1980-3500000";
        let root = derive_output_root(full).unwrap();
        assert_eq!(root, "outputs/clip.mp4");

        let relative = relative_path(full, root);
        assert_eq!(
            join_media_file(relative, "video.mp4"),
            "video/mp4/clear/1080-1980-3500000/video.mp4"
        );
    }

    #[test]
    fn test_join_media_file_handles_trailing_separator() {
        assert_eq!(join_media_file("audio/mp4/clear/128000/", "audio.mp4"), "audio/mp4/clear/128000/audio.mp4");
        assert_eq!(join_media_file("", "audio.mp4"), "audio.mp4");
    }
}
