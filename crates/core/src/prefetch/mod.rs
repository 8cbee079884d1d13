//! Interval prefetching.
//!
//! This module contains the stride projection run at the end of each interval, the
//! recency history that deduplicates its output, and the sink interface the engine
//! dispatches surviving prefetches to.

/// Recently issued prefetch lines (FIFO deduplication).
pub mod history;

/// Interval stride prefetcher (projects one candidate per interval).
pub mod stride;

pub use self::history::PrefetchHistory;
pub use self::stride::{IntervalStridePrefetcher, StrideOutcome};

use crate::common::addr::BlockAddr;
use crate::common::data::AccessKind;

/// A one-block prefetch read handed to every registered sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrefetchRequest {
    /// Block-aligned address to fetch.
    pub addr: u64,
    /// Number of bytes requested (one block).
    pub size: u64,
    /// Access kind of the request; always [`AccessKind::Read`].
    pub kind: AccessKind,
    /// Marks the request as a prefetch rather than a demand access.
    pub prefetch: bool,
}

impl PrefetchRequest {
    /// Builds the read request for one block.
    pub const fn read_block(block: BlockAddr, block_size: u64) -> Self {
        Self {
            addr: block.val(),
            size: block_size,
            kind: AccessKind::Read,
            prefetch: true,
        }
    }
}

/// Receives prefetch requests dispatched by the engine.
///
/// Every registered sink sees every dispatched request. Sinks are invoked
/// synchronously and must not call back into the engine.
pub trait PrefetchSink {
    /// Handles one prefetch request.
    fn on_prefetch(&mut self, request: &PrefetchRequest);
}
