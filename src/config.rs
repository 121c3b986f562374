//! Segmentation thresholds, passed explicitly into the library's entry points.

use serde::{Deserialize, Serialize};

use crate::chapters::DEFAULT_MIN_CHAPTER_CHARS;
use crate::chunker::{DEFAULT_CHUNK_SIZE, DEFAULT_HARD_LIMIT};
use crate::error::{Result, SegmentError};
use crate::title::TITLE_THRESHOLD;

/// Tuning knobs for chapter splitting and chunking.
///
/// The library never reads ambient state; callers construct one of these
/// (or deserialize it from their own configuration file) and pass it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Target chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Absolute ceiling on chunk size; caps `chunk_size` when smaller
    #[serde(default = "default_chunk_hard_limit")]
    pub chunk_hard_limit: usize,

    /// Chapters with fewer body characters fold into their predecessor
    #[serde(default = "default_min_chapter_chars")]
    pub min_chapter_chars: usize,

    /// Minimum title score for a line to open a new chapter
    #[serde(default = "default_title_threshold")]
    pub title_threshold: f64,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_chunk_hard_limit() -> usize {
    DEFAULT_HARD_LIMIT
}

fn default_min_chapter_chars() -> usize {
    DEFAULT_MIN_CHAPTER_CHARS
}

fn default_title_threshold() -> f64 {
    TITLE_THRESHOLD
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_hard_limit: default_chunk_hard_limit(),
            min_chapter_chars: default_min_chapter_chars(),
            title_threshold: default_title_threshold(),
        }
    }
}

impl SegmenterConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target chunk size.
    pub fn with_chunk_size(mut self, chars: usize) -> Self {
        self.chunk_size = chars;
        self
    }

    /// Set the chunk size ceiling.
    pub fn with_chunk_hard_limit(mut self, chars: usize) -> Self {
        self.chunk_hard_limit = chars;
        self
    }

    /// Set the minimum chapter size.
    pub fn with_min_chapter_chars(mut self, chars: usize) -> Self {
        self.min_chapter_chars = chars;
        self
    }

    /// Set the title detection threshold.
    pub fn with_title_threshold(mut self, threshold: f64) -> Self {
        self.title_threshold = threshold;
        self
    }

    /// The chunk size actually enforced: the target capped by the ceiling.
    pub fn effective_chunk_limit(&self) -> usize {
        self.chunk_size.min(self.chunk_hard_limit)
    }

    /// Check the configuration before any processing happens.
    ///
    /// Zero chunk sizes and out-of-range title thresholds are rejected.
    /// `min_chapter_chars` takes any value: zero simply disables merging.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SegmentError::ConfigError(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.chunk_hard_limit == 0 {
            return Err(SegmentError::ConfigError(
                "chunk_hard_limit must be positive".to_string(),
            ));
        }
        if !(self.title_threshold > 0.0 && self.title_threshold <= 1.0) {
            return Err(SegmentError::ConfigError(format!(
                "title_threshold must be within (0.0, 1.0], got {}",
                self.title_threshold
            )));
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML text.
    ///
    /// Missing fields take their defaults. The caller owns reading the
    /// file; this function does no I/O.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SegmenterConfig = toml::from_str(content)
            .map_err(|e| SegmentError::ConfigError(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SegmentError::ConfigError(format!("TOML serialization failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SegmenterConfig::default();
        assert_eq!(config.chunk_size, 150);
        assert_eq!(config.chunk_hard_limit, 200);
        assert_eq!(config.min_chapter_chars, 2000);
        assert_eq!(config.title_threshold, 0.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_chunk_limit() {
        let config = SegmenterConfig::default();
        assert_eq!(config.effective_chunk_limit(), 150);

        let config = config.with_chunk_size(500);
        assert_eq!(config.effective_chunk_limit(), 200);
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
chunk_size = 120
chunk_hard_limit = 180
min_chapter_chars = 1500
title_threshold = 0.7
"#;
        let config = SegmenterConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.chunk_size, 120);
        assert_eq!(config.chunk_hard_limit, 180);
        assert_eq!(config.min_chapter_chars, 1500);
        assert_eq!(config.title_threshold, 0.7);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = SegmenterConfig::from_toml_str("").unwrap();
        assert_eq!(config, SegmenterConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = SegmenterConfig::from_toml_str("chunk_size = 80\n").unwrap();
        assert_eq!(config.chunk_size, 80);
        assert_eq!(config.chunk_hard_limit, 200);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = SegmenterConfig::default()
            .with_chunk_size(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("chunk_size"));
    }

    #[test]
    fn test_zero_hard_limit_rejected() {
        let config = SegmenterConfig::default().with_chunk_hard_limit(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_title_threshold_range() {
        assert!(
            SegmenterConfig::default()
                .with_title_threshold(0.0)
                .validate()
                .is_err()
        );
        assert!(
            SegmenterConfig::default()
                .with_title_threshold(1.5)
                .validate()
                .is_err()
        );
        assert!(
            SegmenterConfig::default()
                .with_title_threshold(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            SegmenterConfig::default()
                .with_title_threshold(1.0)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_negative_min_chapter_chars_rejected_by_parse() {
        let result = SegmenterConfig::from_toml_str("min_chapter_chars = -1\n");
        assert!(matches!(result, Err(SegmentError::ConfigError(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SegmenterConfig::new()
            .with_chunk_size(100)
            .with_min_chapter_chars(500);
        let rendered = config.to_toml_string().unwrap();
        let parsed = SegmenterConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
