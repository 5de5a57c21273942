//! Configuration for the acquisition tool.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Timing and output settings of the acquisition producer.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "save_interval_ms": 30000, "output_dir": "runs" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Period between two generated samples.
    pub sample_interval_ms: u64,
    /// Period between two interval saves of the accumulated series.
    pub save_interval_ms: u64,
    /// Directory receiving the `.npy` files.
    pub output_dir: PathBuf,
    /// File name prefix; files are named `{prefix}_{unix_seconds}.npy`.
    pub file_prefix: String,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 100,
            save_interval_ms: 60_000,
            output_dir: PathBuf::from("."),
            file_prefix: "data".to_string(),
        }
    }
}

impl AcquisitionConfig {
    /// Read a JSON config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms.max(1))
    }

    pub fn save_interval(&self) -> Duration {
        Duration::from_millis(self.save_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("acquire.json");
        std::fs::write(&path, r#"{ "save_interval_ms": 500 }"#).unwrap();

        let cfg = AcquisitionConfig::from_file(&path).unwrap();
        assert_eq!(cfg.save_interval(), Duration::from_millis(500));
        assert_eq!(cfg.sample_interval(), Duration::from_millis(100));
        assert_eq!(cfg.file_prefix, "data");
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("acquire.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(AcquisitionConfig::from_file(&path).is_err());
    }
}
