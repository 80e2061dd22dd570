//! Application state.

use std::sync::Arc;

use vodforge_client::EncodingClient;
use vodforge_encoder::{EncodePipeline, EncoderConfig};
use vodforge_manifest::{ManifestConfig, ManifestGenerator};

use crate::config::ApiConfig;

/// Shared application state.
///
/// The encoding client is constructed once here and handed to the
/// pipeline and the generator explicitly; there is no process-wide
/// client singleton.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: Arc<EncodePipeline>,
    pub generator: Arc<ManifestGenerator>,
}

impl AppState {
    /// Create application state from the environment.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = EncodingClient::from_env()?;
        let encoder_config = EncoderConfig::from_env()?;
        let manifest_config = ManifestConfig::from_env();

        Ok(Self::with_components(
            config,
            EncodePipeline::new(client.clone(), encoder_config),
            ManifestGenerator::new(client, manifest_config),
        ))
    }

    /// Assemble state from already-constructed components.
    pub fn with_components(
        config: ApiConfig,
        pipeline: EncodePipeline,
        generator: ManifestGenerator,
    ) -> Self {
        Self { config, pipeline: Arc::new(pipeline), generator: Arc::new(generator) }
    }
}
