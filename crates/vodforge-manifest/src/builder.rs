//! Common manifest builder contract.
//!
//! The service exposes HLS and DASH manifests through structurally
//! similar but distinct endpoint families. Both flavors share one
//! lifecycle (create the shell, add one entry per classified muxing,
//! start, await), captured by the [`ManifestBuilder`] trait with an
//! implementation per flavor.

use async_trait::async_trait;

use vodforge_client::ClientResult;
use vodforge_models::{ManifestKind, TaskStatus};

use crate::classify::ClassifiedMuxings;

/// Inputs shared by every builder: the classified muxings and the
/// anchoring output location of the encoding.
#[derive(Debug, Clone)]
pub struct ManifestLayout {
    /// Encoding the manifest describes
    pub encoding_id: String,
    /// Output resource all artifacts were written to
    pub output_id: String,
    /// Common path prefix of all artifacts (the output root)
    pub output_root: String,
    /// Classified muxings, in ladder order
    pub muxings: ClassifiedMuxings,
    /// Manifest file name without extension
    pub manifest_name: String,
    /// Language tag for audio entries
    pub audio_language: String,
}

/// Identifiers produced by [`ManifestBuilder::create`] and consumed when
/// adding components.
#[derive(Debug, Clone)]
pub struct ManifestScaffold {
    pub manifest_id: String,
    /// DASH-only: period and adaptation-set ids.
    pub dash: Option<DashScaffold>,
}

#[derive(Debug, Clone)]
pub struct DashScaffold {
    pub period_id: String,
    pub video_adaptation_set_id: String,
    pub audio_adaptation_set_id: String,
}

/// One manifest flavor's view of the generation lifecycle.
#[async_trait]
pub trait ManifestBuilder: Send + Sync {
    fn kind(&self) -> ManifestKind;

    /// Create the manifest shell (and, for DASH, its period and
    /// adaptation sets).
    async fn create(&self, layout: &ManifestLayout) -> ClientResult<ManifestScaffold>;

    /// Add one entry per classified muxing, audio first, in bucket order.
    async fn add_components(
        &self,
        scaffold: &ManifestScaffold,
        layout: &ManifestLayout,
    ) -> ClientResult<()>;

    /// Start the remote generation job.
    async fn start(&self, manifest_id: &str) -> ClientResult<()>;

    /// Fetch the generation job status.
    async fn status(&self, manifest_id: &str) -> ClientResult<TaskStatus>;
}
