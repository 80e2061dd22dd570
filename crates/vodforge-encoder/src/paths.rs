//! Remote storage path construction.
//!
//! Output paths address objects on the remote storage bucket, so they are
//! plain `/`-joined strings, never platform-dependent filesystem paths.

use vodforge_models::{AudioRendition, ContainerFormat, VideoRendition};

/// Join a base path with further segments. The base keeps its leading
/// `/` when present; empty segments are skipped.
pub fn join(base: &str, parts: &[&str]) -> String {
    let mut path = base.trim_end_matches('/').to_string();
    for part in parts {
        let part = part.trim_matches('/');
        if part.is_empty() {
            continue;
        }
        if path.is_empty() {
            path.push_str(part);
        } else {
            path.push('/');
            path.push_str(part);
        }
    }
    path
}

/// Absolute path of the source object for one asset.
pub fn input_path(base: &str, asset: &str) -> String {
    join(base, &[asset])
}

/// Absolute output path of one artifact: `{base}/{asset}/{relative}`.
pub fn output_path(base: &str, asset: &str, relative: &str) -> String {
    join(base, &[asset, relative])
}

/// Relative output path of one video tier, e.g.
/// `video/mp4/clear/1080-1980-3500000`.
pub fn video_rendition_path(container: ContainerFormat, rendition: &VideoRendition) -> String {
    format!("video/{}/clear/{}", container.as_str(), rendition.path_segment())
}

/// Relative output path of one audio tier, e.g. `audio/mp4/clear/128000`.
pub fn audio_rendition_path(container: ContainerFormat, rendition: &AudioRendition) -> String {
    format!("audio/{}/clear/{}", container.as_str(), rendition.path_segment())
}
