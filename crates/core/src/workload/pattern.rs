//! Delta Pattern Generator.
//!
//! Walks a user-supplied list of signed address deltas, gather/scatter style. Each
//! burst applies every delta once; a negative delta larger than the cursor clamps
//! the cursor to 0, and the cursor wraps to 0 once it reaches `max_address`.
//! Patterns can be given directly or parsed from a one-line description:
//!
//! ```text
//!   Gather,0,8,16,24,-24,8,8,8,delta:64,count:4096
//! ```
//!
//! `Gather` issues reads and `Scatter` issues writes. The deltas follow, then two
//! `key:value` fields carrying the inter-burst gap and the total request count.

use std::collections::VecDeque;

use super::Workload;
use crate::common::data::{AccessEvent, AccessKind};
use crate::common::error::WorkloadError;

/// Parameters of a [`Pattern`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternParams {
    /// Signed deltas applied in order within a burst.
    pub deltas: Vec<i64>,
    /// Bytes skipped after each burst.
    pub arr_gap: u64,
    /// Total requests to issue.
    pub count: u64,
    /// Cursor wraps to 0 once it reaches this address.
    pub max_address: u64,
    /// Operation issued (`Read` for gather, `Write` for scatter).
    pub op: AccessKind,
}

impl PatternParams {
    /// Default wrap-around limit.
    pub const DEFAULT_MAX_ADDRESS: u64 = 100_000;

    /// Parses a one-line pattern description.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError::InvalidPattern`] describing the first bad field.
    pub fn parse(line: &str) -> Result<Self, WorkloadError> {
        let invalid = WorkloadError::InvalidPattern;
        let mut fields = line.trim().split(',').map(str::trim);

        let op = match fields.next() {
            Some("Gather") => AccessKind::Read,
            Some("Scatter") => AccessKind::Write,
            other => {
                return Err(invalid(format!(
                    "expected `Gather` or `Scatter`, got `{}`",
                    other.unwrap_or("")
                )));
            }
        };

        let mut deltas = Vec::new();
        let mut settings = Vec::new();
        for field in fields {
            if let Some((_, value)) = field.split_once(':') {
                settings.push(
                    value
                        .trim()
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("invalid setting `{field}`")))?,
                );
            } else if settings.is_empty() {
                deltas.push(
                    field
                        .parse::<i64>()
                        .map_err(|_| invalid(format!("invalid delta `{field}`")))?,
                );
            } else {
                return Err(invalid(format!("delta `{field}` after settings")));
            }
        }

        let &[arr_gap, count] = settings.as_slice() else {
            return Err(invalid(format!(
                "expected gap and count settings, found {}",
                settings.len()
            )));
        };

        Ok(Self {
            deltas,
            arr_gap,
            count,
            max_address: Self::DEFAULT_MAX_ADDRESS,
            op,
        })
    }
}

/// Delta pattern generator.
#[derive(Clone, Debug)]
pub struct Pattern {
    params: PatternParams,
    next_addr: u64,
    remaining: u64,
    pending: VecDeque<AccessEvent>,
}

impl Pattern {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError::EmptyPattern`] when there are no deltas and
    /// [`WorkloadError::ZeroMaxAddress`] when no address can be valid.
    pub fn new(params: PatternParams) -> Result<Self, WorkloadError> {
        if params.deltas.is_empty() {
            return Err(WorkloadError::EmptyPattern);
        }
        if params.max_address == 0 {
            return Err(WorkloadError::ZeroMaxAddress);
        }
        Ok(Self {
            next_addr: 0,
            remaining: params.count,
            pending: VecDeque::with_capacity(params.deltas.len()),
            params,
        })
    }

    fn generate(&mut self) {
        for &delta in &self.params.deltas {
            if self.remaining == 0 {
                break;
            }
            if self.next_addr >= self.params.max_address {
                self.next_addr = 0;
            }
            if delta < 0 && self.next_addr < delta.unsigned_abs() {
                self.next_addr = 0;
            } else {
                self.next_addr = self.next_addr.wrapping_add_signed(delta);
            }
            self.pending
                .push_back(AccessEvent::new(self.next_addr, self.params.op));
            self.remaining -= 1;
        }
        self.next_addr = self.next_addr.wrapping_add(self.params.arr_gap);
    }
}

impl Iterator for Pattern {
    type Item = AccessEvent;

    fn next(&mut self) -> Option<AccessEvent> {
        if self.pending.is_empty() && self.remaining > 0 {
            self.generate();
        }
        self.pending.pop_front()
    }
}

impl Workload for Pattern {
    fn name(&self) -> &str {
        "pattern"
    }

    fn remaining(&self) -> u64 {
        self.remaining + self.pending.len() as u64
    }
}
