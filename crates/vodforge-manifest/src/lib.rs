//! HLS/DASH manifest generation from finished encodings.
//!
//! This crate provides:
//! - Muxing classification by output-path role (`/audio` vs `/video`)
//! - Output-root and relative-path derivation
//! - HLS and DASH builders behind a common [`ManifestBuilder`] contract
//! - The [`ManifestGenerator`] orchestrating list → classify → build → await

pub mod builder;
pub mod classify;
pub mod dash;
pub mod error;
pub mod generator;
pub mod hls;

pub use builder::{DashScaffold, ManifestBuilder, ManifestLayout, ManifestScaffold};
pub use classify::{classify_muxings, derive_output_root, join_media_file, relative_path, ClassifiedMuxings};
pub use dash::DashManifestBuilder;
pub use error::{ManifestError, ManifestResult};
pub use generator::{GeneratedManifests, ManifestConfig, ManifestGenerator};
pub use hls::HlsManifestBuilder;
