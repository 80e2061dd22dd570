//! Rendition ladder submission and encoding job supervision.
//!
//! This crate provides:
//! - The encode pipeline: ladder submission, muxing layout, webhook
//!   registration, job start and completion supervision
//! - Remote storage path construction
//! - The JSON ledger of submitted encodings

pub mod config;
pub mod error;
pub mod ledger;
pub mod paths;
pub mod pipeline;

pub use config::{EncoderConfig, GcsBucketSettings};
pub use error::{EncoderError, EncoderResult};
pub use ledger::Ledger;
pub use pipeline::{EncodePipeline, Submission};
