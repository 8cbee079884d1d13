//! Working-set phase detection and interval stride prefetching.
//!
//! This crate classifies a cache's memory-access stream into recurring execution phases
//! and emulates a simple stride prefetcher on top of the same stream. It provides:
//! 1. **Signatures:** Bloom-style 1024-bit working-set fingerprints and their relative distance.
//! 2. **Phases:** Stability tracking, a growing table of learned phases, and per-interval history.
//! 3. **Prefetch:** Interval stride projection with page-boundary safety and a FIFO dedup history.
//! 4. **Engine:** The `PhaseDetector` that owns all state and fans prefetches out to sinks.
//! 5. **Simulation:** Synthetic access workloads, text trace loading, and statistics reporting.

/// Common types and constants (access events, block addresses, errors).
pub mod common;
/// Detector configuration (defaults, validation, JSON loading).
pub mod config;
/// The phase detection engine that ties every unit together.
pub mod engine;
/// Phase identifiers, the stability classifier, and phase listeners.
pub mod phase;
/// Interval stride prefetcher, prefetch history, and prefetch sinks.
pub mod prefetch;
/// Working-set signatures and the per-interval accumulator.
pub mod signature;
/// Trace loading utilities.
pub mod sim;
/// Detector statistics and exportable run reports.
pub mod stats;
/// Synthetic memory-access workloads.
pub mod workload;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main engine type; construct with `PhaseDetector::new`.
pub use crate::engine::PhaseDetector;
/// Phase identifier (`-1` when no phase is active).
pub use crate::phase::PhaseId;
