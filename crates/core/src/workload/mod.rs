//! Synthetic memory-access workloads.
//!
//! Generators in this module produce the access streams the detector is usually
//! exercised with: strided bursts, gapped bursts, a STREAM-triad replay, and
//! user-supplied gather/scatter delta patterns. Each generator emits requests in
//! bursts, one burst per refill, and stops after its configured request count.
//! [`Phased`] chains generators so a single run walks through several phases.

/// Strided bursts with a fixed gap after each burst.
pub mod single_stream;

/// Strided bursts with a one-off jump inside each burst.
pub mod gapped_stream;

/// Fixed STREAM-triad address pattern.
pub mod stream_bench;

/// User-supplied signed delta patterns (gather/scatter).
pub mod pattern;

/// Sequential concatenation of workloads.
pub mod phased;

pub use self::gapped_stream::{GappedStream, GappedStreamParams};
pub use self::pattern::{Pattern, PatternParams};
pub use self::phased::Phased;
pub use self::single_stream::{SingleStream, SingleStreamParams};
pub use self::stream_bench::StreamBench;

use std::fmt;

use crate::common::data::AccessEvent;

/// A finite stream of access events.
pub trait Workload: Iterator<Item = AccessEvent> + fmt::Debug {
    /// Short human-readable name of the generator.
    fn name(&self) -> &str;

    /// Requests still to be emitted.
    fn remaining(&self) -> u64;
}
