//! STREAM Benchmark Generator.
//!
//! Replays the address deltas of a STREAM triad kernel over a small footprint.
//! Each burst walks the sixteen deltas below; the cursor resets to 0 whenever it
//! leaves `[0, MAX_ADDRESS)` and advances by `ARR_GAP` between bursts.

use std::collections::VecDeque;

use super::Workload;
use crate::common::data::AccessEvent;

/// Per-request address deltas of one burst.
pub const DELTAS: [i64; 16] = [
    0, 32, 32, -96, 160, 32, 32, -96, 160, 32, 32, -96, 160, 32, 32, -96,
];

/// Bytes skipped between bursts.
pub const ARR_GAP: i64 = 32;

/// Exclusive upper bound of the footprint.
pub const MAX_ADDRESS: i64 = 12_400;

/// Default number of requests issued.
pub const DEFAULT_COUNT: u64 = 81_006;

/// STREAM triad replay.
#[derive(Clone, Debug)]
pub struct StreamBench {
    next_addr: i64,
    remaining: u64,
    pending: VecDeque<AccessEvent>,
}

impl StreamBench {
    /// Creates a generator issuing `count` reads.
    pub fn new(count: u64) -> Self {
        Self {
            next_addr: 0,
            remaining: count,
            pending: VecDeque::with_capacity(DELTAS.len()),
        }
    }

    fn generate(&mut self) {
        for delta in DELTAS {
            if self.remaining == 0 {
                break;
            }
            self.next_addr += delta;
            if !(0..MAX_ADDRESS).contains(&self.next_addr) {
                self.next_addr = 0;
            }
            self.pending.push_back(AccessEvent::read(self.next_addr as u64));
            self.remaining -= 1;
        }
        self.next_addr += ARR_GAP;
    }
}

impl Default for StreamBench {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT)
    }
}

impl Iterator for StreamBench {
    type Item = AccessEvent;

    fn next(&mut self) -> Option<AccessEvent> {
        if self.pending.is_empty() && self.remaining > 0 {
            self.generate();
        }
        self.pending.pop_front()
    }
}

impl Workload for StreamBench {
    fn name(&self) -> &str {
        "stream-bench"
    }

    fn remaining(&self) -> u64 {
        self.remaining + self.pending.len() as u64
    }
}
