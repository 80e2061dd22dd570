//! HTTP client for the cloud encoding service.
//!
//! This crate provides:
//! - Typed operations for encodings, codec configurations, streams and muxings
//! - Storage resource management (inputs, outputs) and webhook registration
//! - HLS and DASH manifest operations
//! - Bounded retry with exponential backoff for transient failures
//! - A generic completion poller for asynchronous remote jobs

pub mod client;
pub mod config;
pub mod error;
pub mod poll;
pub mod types;

mod encodings;
mod manifests;
mod resources;

pub use client::EncodingClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use poll::{await_completion, PollConfig};
