//! JSON ledger of submitted encodings.
//!
//! A single JSON object keyed by asset name, mapping codec type to the
//! encoding id. Read-modify-write on every record; a missing file counts
//! as an empty ledger. Not safe for concurrent writers.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::EncoderResult;

type LedgerData = BTreeMap<String, BTreeMap<String, String>>;

/// Append-only map of asset name → codec type → encoding id.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record the encoding id submitted for an asset and codec type.
    pub async fn record(
        &self,
        asset: &str,
        codec_type: &str,
        encoding_id: &str,
    ) -> EncoderResult<()> {
        let mut data = self.load().await?;
        data.entry(asset.to_string())
            .or_default()
            .insert(codec_type.to_string(), encoding_id.to_string());

        let serialized = serde_json::to_vec_pretty(&data)?;
        tokio::fs::write(&self.path, serialized).await?;
        Ok(())
    }

    /// Look up the encoding id recorded for an asset and codec type.
    pub async fn lookup(&self, asset: &str, codec_type: &str) -> EncoderResult<Option<String>> {
        let data = self.load().await?;
        Ok(data.get(asset).and_then(|codecs| codecs.get(codec_type)).cloned())
    }

    async fn load(&self) -> EncoderResult<LedgerData> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(LedgerData::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_and_lookup_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("encodings.json");

        let ledger = Ledger::new(&path);
        ledger.record("clip.mp4", "h264_aac", "enc-1").await.unwrap();

        // A separate handle reads the same file
        let other = Ledger::new(&path);
        assert_eq!(other.lookup("clip.mp4", "h264_aac").await.unwrap(), Some("enc-1".to_string()));
        assert_eq!(other.lookup("clip.mp4", "av1").await.unwrap(), None);
        assert_eq!(other.lookup("other.mp4", "h264_aac").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_record_preserves_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("encodings.json"));

        ledger.record("a.mp4", "h264_aac", "enc-1").await.unwrap();
        ledger.record("b.mp4", "h264_aac", "enc-2").await.unwrap();
        ledger.record("a.mp4", "av1", "enc-3").await.unwrap();

        assert_eq!(ledger.lookup("a.mp4", "h264_aac").await.unwrap(), Some("enc-1".to_string()));
        assert_eq!(ledger.lookup("b.mp4", "h264_aac").await.unwrap(), Some("enc-2".to_string()));
        assert_eq!(ledger.lookup("a.mp4", "av1").await.unwrap(), Some("enc-3".to_string()));
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("does-not-exist.json"));
        assert_eq!(ledger.lookup("clip.mp4", "h264_aac").await.unwrap(), None);
    }
}
