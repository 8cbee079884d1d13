//! Configuration system for the phase detector.
//!
//! This module defines the configuration structures used to parameterize the detector.
//! It provides:
//! 1. **Defaults:** Baseline interval, stability, and prefetch constants.
//! 2. **Structures:** A detector section (signatures and phases) and a prefetch section.
//! 3. **Validation:** Rejection of values that would make the engine meaningless.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built with `Config::default()`.
//! Every field is optional in JSON; missing fields take the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the detector.
mod defaults {
    /// Number of demand accesses per interval.
    pub const INTERVAL_LEN: u64 = 10_000;

    /// Consecutive similar intervals required before a phase is learned.
    pub const STABLE_MIN: u32 = 4;

    /// Signature distance below which two intervals count as similar.
    pub const THRESHOLD: f64 = 0.5;

    /// Low address bits discarded before hashing.
    ///
    /// Coalesces nearby addresses into the same signature bit.
    pub const DROP_BITS: u32 = 3;

    /// Cache line size in bytes.
    pub const BLOCK_SIZE: u64 = 64;

    /// Number of recently issued prefetch lines remembered for deduplication.
    pub const HISTORY_DEPTH: usize = 16;

    /// How many strides ahead the prefetcher projects.
    pub const REACH: u64 = 2;

    /// Page size used for the page-boundary check.
    pub const PAGE_SIZE: u64 = 4096;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use phasedet_core::config::Config;
///
/// let json = r#"{
///     "detector": { "interval_len": 4, "stable_min": 2 },
///     "prefetch": { "overrun_page_boundaries": true }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.detector.interval_len, 4);
/// assert_eq!(config.detector.threshold, 0.5);
/// assert!(config.prefetch.overrun_page_boundaries);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Signature and phase classification settings
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Stride prefetcher and deduplication settings
    #[serde(default)]
    pub prefetch: PrefetchConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation error
    /// from [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the same
    /// errors as [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks every field for values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detector.validate()?;
        self.prefetch.validate()
    }
}

/// Signature and phase classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Demand accesses per interval
    #[serde(default = "DetectorConfig::default_interval_len")]
    pub interval_len: u64,

    /// Consecutive similar intervals required to learn a phase
    #[serde(default = "DetectorConfig::default_stable_min")]
    pub stable_min: u32,

    /// Similarity cutoff; distances strictly below it count as similar
    #[serde(default = "DetectorConfig::default_threshold")]
    pub threshold: f64,

    /// Low address bits dropped before hashing
    #[serde(default = "DetectorConfig::default_drop_bits")]
    pub drop_bits: u32,
}

impl DetectorConfig {
    fn default_interval_len() -> u64 {
        defaults::INTERVAL_LEN
    }

    fn default_stable_min() -> u32 {
        defaults::STABLE_MIN
    }

    fn default_threshold() -> f64 {
        defaults::THRESHOLD
    }

    fn default_drop_bits() -> u32 {
        defaults::DROP_BITS
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_len == 0 {
            return Err(ConfigError::ZeroIntervalLength);
        }
        if self.stable_min == 0 {
            return Err(ConfigError::ZeroStableMin);
        }
        // NaN fails both comparisons and is rejected here too.
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        if self.drop_bits >= 64 {
            return Err(ConfigError::DropBitsTooLarge(self.drop_bits));
        }
        Ok(())
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            interval_len: defaults::INTERVAL_LEN,
            stable_min: defaults::STABLE_MIN,
            threshold: defaults::THRESHOLD,
            drop_bits: defaults::DROP_BITS,
        }
    }
}

/// Stride prefetcher and deduplication settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefetchConfig {
    /// Cache line size in bytes
    #[serde(default = "PrefetchConfig::default_block_size")]
    pub block_size: u64,

    /// Prefetch history depth (K)
    #[serde(default = "PrefetchConfig::default_history_depth")]
    pub history_depth: usize,

    /// Strides to project ahead of the target address
    #[serde(default = "PrefetchConfig::default_reach")]
    pub reach: u64,

    /// Page size for the boundary check
    #[serde(default = "PrefetchConfig::default_page_size")]
    pub page_size: u64,

    /// Allow prefetches that cross into the next page
    #[serde(default)]
    pub overrun_page_boundaries: bool,
}

impl PrefetchConfig {
    fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }

    fn default_history_depth() -> usize {
        defaults::HISTORY_DEPTH
    }

    fn default_reach() -> u64 {
        defaults::REACH
    }

    fn default_page_size() -> u64 {
        defaults::PAGE_SIZE
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::InvalidBlockSize(self.block_size));
        }
        if self.page_size == 0 || self.page_size % self.block_size != 0 {
            return Err(ConfigError::InvalidPageSize {
                page_size: self.page_size,
                block_size: self.block_size,
            });
        }
        if self.history_depth == 0 {
            return Err(ConfigError::ZeroHistoryDepth);
        }
        Ok(())
    }
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            block_size: defaults::BLOCK_SIZE,
            history_depth: defaults::HISTORY_DEPTH,
            reach: defaults::REACH,
            page_size: defaults::PAGE_SIZE,
            overrun_page_boundaries: false,
        }
    }
}
