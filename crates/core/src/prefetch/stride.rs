//! Interval Stride Prefetcher.
//!
//! Runs once per interval over the buffered addresses, in arrival order. Detection
//! walks the pairs `(i, j)` with `i < j` and takes the first pair it finds; the
//! stride is the index distance `j - i`, not the address delta. The candidate is
//! projected `reach` strides ahead of the address at `j` and aligned down to its
//! block.
//!
//! Unless page overruns are allowed, a candidate landing in a different page than
//! the address it was projected from is cancelled, since the physical page that
//! follows may not belong to the same mapping.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `propose()`: O(1) in practice; detection stops on the first pair
//! - **Space Complexity:** O(1)

use tracing::trace;

use crate::common::addr::{BlockAddr, same_page};
use crate::config::PrefetchConfig;

/// A detected stride pair in the interval buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StridePair {
    /// Buffer position of the earlier access.
    pub first: usize,
    /// Buffer position of the later access.
    pub second: usize,
    /// Index distance between the two positions.
    pub stride: u64,
}

/// Outcome of one interval's stride projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrideOutcome {
    /// Fewer than two addresses were buffered.
    NoStride,
    /// A block to prefetch.
    Candidate {
        /// Address the projection started from.
        target: u64,
        /// Detected stride.
        stride: u64,
        /// Block to prefetch.
        block: BlockAddr,
    },
    /// The projection crossed a page boundary and overruns are disallowed.
    PageLimited {
        /// Address the projection started from.
        target: u64,
        /// Block that would have been prefetched.
        block: BlockAddr,
    },
}

/// Interval stride prefetcher state.
#[derive(Clone, Copy, Debug)]
pub struct IntervalStridePrefetcher {
    /// Strides to project ahead.
    reach: u64,
    /// Size of a cache line in bytes.
    block_size: u64,
    /// Page size for the boundary check.
    page_size: u64,
    /// Accept candidates in a different page.
    overrun: bool,
}

impl IntervalStridePrefetcher {
    /// Creates a new interval stride prefetcher.
    ///
    /// # Arguments
    ///
    /// * `reach` - How many strides ahead to project.
    /// * `block_size` - Cache line size in bytes (non-zero).
    /// * `page_size` - Page size in bytes (non-zero).
    /// * `overrun` - Whether candidates may cross into another page.
    pub const fn new(reach: u64, block_size: u64, page_size: u64, overrun: bool) -> Self {
        Self {
            reach,
            block_size,
            page_size,
            overrun,
        }
    }

    /// Builds a prefetcher from a validated prefetch configuration.
    pub const fn from_config(config: &PrefetchConfig) -> Self {
        Self::new(
            config.reach,
            config.block_size,
            config.page_size,
            config.overrun_page_boundaries,
        )
    }

    /// Projects at most one prefetch block from an interval's addresses.
    pub fn propose(&self, interval: &[u64]) -> StrideOutcome {
        let Some(pair) = detect_stride(interval) else {
            return StrideOutcome::NoStride;
        };

        let target = interval[pair.second];
        let projected = target.wrapping_add(self.reach.wrapping_mul(pair.stride));
        let block = BlockAddr::containing(projected, self.block_size);

        if !self.overrun && !same_page(target, block.val(), self.page_size) {
            trace!(
                base = target,
                block = %block,
                "prefetch cancelled, request exceeds physical page limit"
            );
            return StrideOutcome::PageLimited { target, block };
        }

        trace!(
            base = target,
            block = %block,
            stride = pair.stride,
            reach = self.reach,
            "stride candidate"
        );
        StrideOutcome::Candidate {
            target,
            stride: pair.stride,
            block,
        }
    }

    /// Whether candidates may cross page boundaries.
    pub const fn allows_overrun(&self) -> bool {
        self.overrun
    }
}

/// Finds the stride pair used for projection.
///
/// Pairs are visited in `(i, j)` order and the first one wins, so any buffer with
/// two or more addresses yields `(0, 1)` with stride 1.
pub fn detect_stride(interval: &[u64]) -> Option<StridePair> {
    let n = interval.len();
    (0..n)
        .flat_map(|first| (first + 1..n).map(move |second| (first, second)))
        .next()
        .map(|(first, second)| StridePair {
            first,
            second,
            stride: (second - first) as u64,
        })
}
