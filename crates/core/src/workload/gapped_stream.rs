//! Gapped Stream Generator.
//!
//! Same burst shape as the single stream, except that the step at burst position
//! `gap_location` grows by `gap_jump` instead of `stride`. The cursor never wraps;
//! `stop` only bounds the accepted start address. Only reads are issued.

use std::collections::VecDeque;

use tracing::debug;

use super::Workload;
use crate::common::data::AccessEvent;
use crate::common::error::WorkloadError;

/// Parameters of a [`GappedStream`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GappedStreamParams {
    /// Total requests to issue.
    pub count: u64,
    /// First address.
    pub start: u64,
    /// Upper bound for `start`.
    pub stop: u64,
    /// Burst position whose step takes the jump. Position 0 never jumps.
    pub gap_location: u64,
    /// Step increment applied at `gap_location`.
    pub gap_jump: u64,
    /// Bytes skipped after each burst.
    pub arr_gap: u64,
    /// Step increment at every other position.
    pub stride: u64,
    /// Requests per burst.
    pub length: u64,
}

impl Default for GappedStreamParams {
    fn default() -> Self {
        Self {
            count: 1000,
            start: 0,
            stop: 524_228,
            gap_location: 0,
            gap_jump: 5,
            arr_gap: 100,
            stride: 1,
            length: 8,
        }
    }
}

/// Gapped burst generator.
#[derive(Clone, Debug)]
pub struct GappedStream {
    params: GappedStreamParams,
    next_addr: u64,
    remaining: u64,
    pending: VecDeque<AccessEvent>,
}

impl GappedStream {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError::InvertedRange`] when `start > stop` and
    /// [`WorkloadError::ZeroLength`] for empty bursts.
    pub fn new(params: GappedStreamParams) -> Result<Self, WorkloadError> {
        if params.start > params.stop {
            return Err(WorkloadError::InvertedRange {
                start: params.start,
                stop: params.stop,
            });
        }
        if params.length == 0 {
            return Err(WorkloadError::ZeroLength);
        }
        debug!(
            start = params.start,
            stop = params.stop,
            "gapped stream generator created"
        );
        Ok(Self {
            next_addr: params.start,
            remaining: params.count,
            pending: VecDeque::with_capacity(params.length as usize),
            params,
        })
    }

    fn generate(&mut self) {
        let mut step = 0u64;
        for i in 0..self.params.length {
            if self.remaining == 0 {
                break;
            }
            if i > 0 {
                let inc = if i == self.params.gap_location {
                    self.params.gap_jump
                } else {
                    self.params.stride
                };
                step = step.wrapping_add(inc);
            }
            self.next_addr = self.next_addr.wrapping_add(step);
            self.pending.push_back(AccessEvent::read(self.next_addr));
            self.remaining -= 1;
        }
        self.next_addr = self.next_addr.wrapping_add(self.params.arr_gap);
    }
}

impl Iterator for GappedStream {
    type Item = AccessEvent;

    fn next(&mut self) -> Option<AccessEvent> {
        if self.pending.is_empty() && self.remaining > 0 {
            self.generate();
        }
        self.pending.pop_front()
    }
}

impl Workload for GappedStream {
    fn name(&self) -> &str {
        "gapped-stream"
    }

    fn remaining(&self) -> u64 {
        self.remaining + self.pending.len() as u64
    }
}
