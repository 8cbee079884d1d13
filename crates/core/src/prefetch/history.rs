//! Prefetch History.
//!
//! Remembers the last `K` block addresses the engine dispatched so the same line is
//! not prefetched again while it is still likely to be in flight or resident. It
//! operates as a bounded FIFO: the oldest entry is evicted when a new line arrives
//! at capacity, regardless of how often the old line was proposed since.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `admit()`: O(K) for the membership scan, O(1) insertion
//! - **Space Complexity:** O(K)

use std::collections::VecDeque;

use crate::common::addr::BlockAddr;

/// Bounded FIFO of recently dispatched prefetch blocks.
#[derive(Clone, Debug)]
pub struct PrefetchHistory {
    /// Oldest entry at the front.
    entries: VecDeque<BlockAddr>,
    /// Maximum number of entries (K).
    depth: usize,
}

impl PrefetchHistory {
    /// Creates an empty history holding at most `depth` blocks.
    ///
    /// Storage grows with admissions, so a large `depth` costs nothing up front.
    pub const fn new(depth: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            depth,
        }
    }

    /// Returns `true` if `block` was dispatched within the last `K` admissions.
    pub fn contains(&self, block: BlockAddr) -> bool {
        self.entries.contains(&block)
    }

    /// Records `block` unless it is already present.
    ///
    /// # Returns
    ///
    /// `true` if the block was new and should be dispatched, `false` if it is a
    /// repeat and must be dropped.
    pub fn admit(&mut self, block: BlockAddr) -> bool {
        if self.contains(block) {
            return false;
        }
        if self.entries.len() == self.depth {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(block);
        true
    }

    /// Number of blocks currently remembered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been admitted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of blocks remembered (K).
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Remembered blocks, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = BlockAddr> + '_ {
        self.entries.iter().copied()
    }
}
