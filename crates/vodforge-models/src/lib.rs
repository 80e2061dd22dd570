//! Shared data models for the vodforge encoding pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - The fixed video/audio rendition ladders
//! - Remote job status and task messages
//! - Muxing records returned by the encoding service
//! - Container formats and manifest kinds

pub mod job;
pub mod ladder;
pub mod manifest;
pub mod muxing;

// Re-export common types
pub use job::{JobHandle, JobKind, JobStatus, MessageLevel, TaskMessage, TaskStatus};
pub use ladder::{audio_ladder, video_ladder, AudioRendition, H264Profile, VideoRendition};
pub use manifest::ManifestKind;
pub use muxing::{ContainerFormat, MuxingRecord};
