//! Encoder configuration.

use std::path::PathBuf;
use std::time::Duration;

use vodforge_client::types::{GcsInputRequest, GcsOutputRequest};
use vodforge_client::PollConfig;

use crate::error::{EncoderError, EncoderResult};

/// Credentials and naming for one GCS bucket resource.
#[derive(Debug, Clone)]
pub struct GcsBucketSettings {
    /// Unique resource name used for reuse lookups
    pub unique_name: String,
    pub bucket_name: String,
    pub access_key: String,
    pub secret_key: String,
}

/// Encoder configuration.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Cloud region the encoding runs in
    pub cloud_region: String,
    /// External infrastructure to run encodings on, when configured
    pub infrastructure_id: Option<String>,
    /// Source bucket
    pub input: GcsBucketSettings,
    /// Artifact bucket
    pub output: GcsBucketSettings,
    /// Base path prefixed to every input object
    pub input_base_path: String,
    /// Base path prefixed to every output artifact
    pub output_base_path: String,
    /// Reuse existing named storage resources instead of creating new ones
    pub reuse_resources: bool,
    /// Webhook invoked by the service when the encoding finishes
    pub webhook_url: Option<String>,
    /// Path of the JSON encodings ledger
    pub ledger_path: PathBuf,
    /// Polling behaviour for encoding jobs
    pub poll: PollConfig,
}

impl EncoderConfig {
    /// Create config from environment variables.
    ///
    /// Bucket credentials and base paths have no sane default; their
    /// absence is a startup-time configuration error.
    pub fn from_env() -> EncoderResult<Self> {
        Ok(Self {
            cloud_region: std::env::var("ENCODER_CLOUD_REGION")
                .unwrap_or_else(|_| "GOOGLE_US_CENTRAL_1".to_string()),
            infrastructure_id: std::env::var("ENCODER_INFRASTRUCTURE_ID")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            input: GcsBucketSettings {
                unique_name: std::env::var("GCS_INPUT_UNIQUE_NAME")
                    .unwrap_or_else(|_| "VodforgeGcsInput".to_string()),
                bucket_name: require_env("GCS_INPUT_BUCKET_NAME")?,
                access_key: require_env("GCS_INPUT_ACCESS_KEY")?,
                secret_key: require_env("GCS_INPUT_SECRET_KEY")?,
            },
            output: GcsBucketSettings {
                unique_name: std::env::var("GCS_OUTPUT_UNIQUE_NAME")
                    .unwrap_or_else(|_| "VodforgeGcsOutput".to_string()),
                bucket_name: require_env("GCS_OUTPUT_BUCKET_NAME")?,
                access_key: require_env("GCS_OUTPUT_ACCESS_KEY")?,
                secret_key: require_env("GCS_OUTPUT_SECRET_KEY")?,
            },
            input_base_path: require_env("INPUT_BASE_PATH")?,
            output_base_path: require_env("OUTPUT_BASE_PATH")?,
            reuse_resources: std::env::var("ENCODER_REUSE_RESOURCES")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            webhook_url: std::env::var("WEBHOOK_SUCCESS_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            ledger_path: PathBuf::from(
                std::env::var("ENCODER_LEDGER_PATH").unwrap_or_else(|_| "encodings.json".to_string()),
            ),
            poll: PollConfig::new(Duration::from_secs(
                std::env::var("ENCODER_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ))
            .with_deadline(Duration::from_secs(
                std::env::var("ENCODER_POLL_DEADLINE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(7200),
            )),
        })
    }

    pub(crate) fn gcs_input_request(&self) -> GcsInputRequest {
        GcsInputRequest {
            name: self.input.unique_name.clone(),
            bucket_name: self.input.bucket_name.clone(),
            access_key: self.input.access_key.clone(),
            secret_key: self.input.secret_key.clone(),
        }
    }

    pub(crate) fn gcs_output_request(&self) -> GcsOutputRequest {
        GcsOutputRequest {
            name: self.output.unique_name.clone(),
            bucket_name: self.output.bucket_name.clone(),
            access_key: self.output.access_key.clone(),
            secret_key: self.output.secret_key.clone(),
        }
    }
}

/// Read a required environment variable; empty counts as absent.
fn require_env(name: &'static str) -> EncoderResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(EncoderError::MissingConfig(name)),
    }
}
