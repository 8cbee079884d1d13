//! Error definitions.
//!
//! The detector itself never fails at runtime: once constructed, every access either
//! accumulates or completes an interval. Errors therefore only surface at the edges:
//! 1. **Configuration:** Rejected parameters stop the engine from being built.
//! 2. **Workloads:** Generator parameters that cannot describe a stream.
//! 3. **Traces:** Unreadable files or malformed trace lines.

use std::io;

use thiserror::Error;

/// A configuration value that cannot drive the detector.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The interval length must be at least one access.
    #[error("interval_len must be positive")]
    ZeroIntervalLength,

    /// The interval length does not fit in host memory indices.
    #[error("interval_len {0} is too large for this host")]
    IntervalTooLong(u64),

    /// At least one stable interval is required before a phase can be learned.
    #[error("stable_min must be positive")]
    ZeroStableMin,

    /// The similarity cutoff lies outside `(0, 1]`.
    #[error("threshold must lie in (0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    /// Dropping every address bit would collapse all addresses together.
    #[error("drop_bits must be below 64, got {0}")]
    DropBitsTooLarge(u32),

    /// The block size must be a non-zero power of two.
    #[error("block_size must be a non-zero power of two, got {0}")]
    InvalidBlockSize(u64),

    /// The page size must be a non-zero multiple of the block size.
    #[error("page_size {page_size} must be a non-zero multiple of block_size {block_size}")]
    InvalidPageSize {
        /// Configured page size.
        page_size: u64,
        /// Configured block size.
        block_size: u64,
    },

    /// The prefetch history must hold at least one entry.
    #[error("history_depth must be positive")]
    ZeroHistoryDepth,

    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),
}

/// Generator parameters that do not describe a usable access stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkloadError {
    /// Bursts must contain at least one request.
    #[error("request length must be positive")]
    ZeroLength,

    /// The start index lies past the stop index.
    #[error("start address ({start}) must be less than stop address ({stop})")]
    InvertedRange {
        /// First address of the stream.
        start: u64,
        /// Last address the stream may reach.
        stop: u64,
    },

    /// The wrap-around limit is zero, so no address is ever valid.
    #[error("max_address must be positive")]
    ZeroMaxAddress,

    /// A delta pattern with no entries.
    #[error("delta pattern is empty")]
    EmptyPattern,

    /// A pattern description that could not be parsed.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Failure while loading an access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be read.
    #[error("could not read trace: {0}")]
    Io(#[from] io::Error),

    /// A trace line could not be parsed.
    #[error("line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
}
