//! Phased workload: runs several generators back to back.

use std::collections::VecDeque;

use super::Workload;
use crate::common::data::AccessEvent;

/// Concatenation of workloads, each drained before the next starts.
#[derive(Debug, Default)]
pub struct Phased {
    parts: VecDeque<Box<dyn Workload>>,
}

impl Phased {
    /// Creates a phased workload from its parts, in order.
    pub fn new(parts: Vec<Box<dyn Workload>>) -> Self {
        Self {
            parts: parts.into(),
        }
    }

    /// Appends another part.
    #[must_use]
    pub fn then(mut self, part: Box<dyn Workload>) -> Self {
        self.parts.push_back(part);
        self
    }
}

impl Iterator for Phased {
    type Item = AccessEvent;

    fn next(&mut self) -> Option<AccessEvent> {
        while let Some(part) = self.parts.front_mut() {
            if let Some(event) = part.next() {
                return Some(event);
            }
            let _ = self.parts.pop_front();
        }
        None
    }
}

impl Workload for Phased {
    fn name(&self) -> &str {
        "phased"
    }

    fn remaining(&self) -> u64 {
        self.parts.iter().map(|p| p.remaining()).sum()
    }
}
