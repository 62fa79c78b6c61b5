//! Encoder configuration
//!
//! Loaded from TOML; every field is optional and falls back to the defaults.
//!
//! ```toml
//! bits_per_axis = 16
//! parallel_threshold = 65536
//! num_threads = 8
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MortonError, MortonResult};
use crate::morton::MAX_BITS_PER_AXIS;

/// Configuration for [`MortonEncoder`](crate::MortonEncoder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Quantization bits per axis; codes use `3 * bits_per_axis` bits
    pub bits_per_axis: u32,
    /// Batches with at least this many points run on the thread pool
    pub parallel_threshold: usize,
    /// Size of a dedicated thread pool; `None` uses rayon's global pool
    pub num_threads: Option<usize>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            bits_per_axis: MAX_BITS_PER_AXIS,
            parallel_threshold: 16_384,
            num_threads: None,
        }
    }
}

impl EncoderConfig {
    pub fn with_bits_per_axis(mut self, bits: u32) -> Self {
        self.bits_per_axis = bits;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    pub fn validate(&self) -> MortonResult<()> {
        if self.bits_per_axis == 0 || self.bits_per_axis > MAX_BITS_PER_AXIS {
            return Err(MortonError::InvalidBitWidth {
                bits: self.bits_per_axis,
            });
        }
        if self.num_threads == Some(0) {
            return Err(MortonError::Config(
                "num_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> MortonResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| MortonError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> MortonResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn to_toml_string(&self) -> MortonResult<String> {
        toml::to_string(self).map_err(|e| MortonError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = EncoderConfig::default();
        assert_eq!(config.bits_per_axis, 21);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EncoderConfig::from_toml_str("bits_per_axis = 10").unwrap();
        assert_eq!(config.bits_per_axis, 10);
        assert_eq!(config.parallel_threshold, EncoderConfig::default().parallel_threshold);
        assert_eq!(config.num_threads, None);
    }

    #[test]
    fn test_rejects_bad_bit_width() {
        for raw in ["bits_per_axis = 0", "bits_per_axis = 22"] {
            let err = EncoderConfig::from_toml_str(raw).unwrap_err();
            assert!(matches!(err, MortonError::InvalidBitWidth { .. }), "{raw}: {err}");
        }
    }

    #[test]
    fn test_rejects_zero_threads() {
        let err = EncoderConfig::from_toml_str("num_threads = 0").unwrap_err();
        assert!(matches!(err, MortonError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = EncoderConfig::from_toml_str("bits_per_axis = \"ten\"").unwrap_err();
        assert!(matches!(err, MortonError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EncoderConfig::default()
            .with_bits_per_axis(16)
            .with_parallel_threshold(1024)
            .with_num_threads(2);
        let raw = config.to_toml_string().unwrap();
        assert_eq!(EncoderConfig::from_toml_str(&raw).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bits_per_axis = 12\nparallel_threshold = 10").unwrap();

        let config = EncoderConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.bits_per_axis, 12);
        assert_eq!(config.parallel_threshold, 10);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EncoderConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, MortonError::Io(_)));
    }
}
