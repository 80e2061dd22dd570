//! Axum HTTP server for encoding triggers and webhooks.
//!
//! This crate provides:
//! - The storage-change trigger that submits the rendition ladder
//! - The encoding-finished webhook target that generates manifests
//! - Health, readiness and Prometheus metrics endpoints
//! - Request-id, logging and security-header middleware

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod signature;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
