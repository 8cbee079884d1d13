//! Single Stream Generator.
//!
//! Emits bursts of `length` requests. Inside a burst the step between consecutive
//! requests grows by `stride` each time (0, s, 2s, ...), so a burst covers a short
//! quadratic ramp. After each burst the cursor skips `arr_gap` bytes and wraps back
//! to `start` once it reaches `max_address`.

use std::collections::VecDeque;

use tracing::debug;

use super::Workload;
use crate::common::data::{AccessEvent, AccessKind};
use crate::common::error::WorkloadError;

/// Parameters of a [`SingleStream`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleStreamParams {
    /// Total requests to issue.
    pub count: u64,
    /// Requests per burst.
    pub length: u64,
    /// First address.
    pub start: u64,
    /// Cursor wraps to `start` when it reaches this address.
    pub max_address: u64,
    /// Bytes skipped after each burst.
    pub arr_gap: u64,
    /// Step increment inside a burst.
    pub stride: u64,
    /// Operation issued (`Read` or `Write`).
    pub op: AccessKind,
}

impl Default for SingleStreamParams {
    fn default() -> Self {
        Self {
            count: 1000,
            length: 8,
            start: 0,
            max_address: 524_288,
            arr_gap: 100,
            stride: 1,
            op: AccessKind::Read,
        }
    }
}

/// Strided burst generator.
#[derive(Clone, Debug)]
pub struct SingleStream {
    params: SingleStreamParams,
    next_addr: u64,
    remaining: u64,
    pending: VecDeque<AccessEvent>,
}

impl SingleStream {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError::ZeroLength`] for empty bursts and
    /// [`WorkloadError::ZeroMaxAddress`] when no address can be valid.
    pub fn new(params: SingleStreamParams) -> Result<Self, WorkloadError> {
        if params.length == 0 {
            return Err(WorkloadError::ZeroLength);
        }
        if params.max_address == 0 {
            return Err(WorkloadError::ZeroMaxAddress);
        }
        debug!(
            count = params.count,
            length = params.length,
            max_address = params.max_address,
            start = params.start,
            op = %params.op,
            "single stream generator created"
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
                step = step.wrapping_add(self.params.stride);
            }
            self.next_addr = self.next_addr.wrapping_add(step);
            self.pending
                .push_back(AccessEvent::new(self.next_addr, self.params.op));
            self.remaining -= 1;
        }
        self.next_addr = self.next_addr.wrapping_add(self.params.arr_gap);
        if self.next_addr >= self.params.max_address {
            self.next_addr = self.params.start;
        }
    }
}

impl Iterator for SingleStream {
    type Item = AccessEvent;

    fn next(&mut self) -> Option<AccessEvent> {
        if self.pending.is_empty() && self.remaining > 0 {
            self.generate();
        }
        self.pending.pop_front()
    }
}

impl Workload for SingleStream {
    fn name(&self) -> &str {
        "single-stream"
    }

    fn remaining(&self) -> u64 {
        self.remaining + self.pending.len() as u64
    }
}
