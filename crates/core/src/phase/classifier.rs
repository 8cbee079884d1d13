//! Phase Classifier.
//!
//! Decides, once per interval, which phase the program is in by comparing the
//! interval's signature with the previous interval's and with every phase learned
//! so far.
//!
//! A phase is *learned* after `stable_min` consecutive intervals whose signatures
//! stay within `threshold` of their predecessor while no phase is active. Any large
//! change drops back to unknown and searches the table, so a workload returning to
//! an earlier pattern re-enters that phase instead of creating a new one.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `classify()`: O(1) on stable intervals, O(P) otherwise where P is the number
//!     of learned phases
//! - **Space Complexity:** O(P + I) where I is the number of intervals classified

use tracing::debug;

use super::PhaseId;
use crate::signature::Signature;

/// What happened to the phase on the last classified interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseEvent {
    /// The signature changed too much (or is still settling); no phase is active.
    Unknown,
    /// Stability reached `stable_min`: a new table entry was created.
    Learned,
    /// The signature is stable and the active phase continues.
    Continued,
    /// After a change, the signature matched a phase learned earlier.
    Reentered,
}

/// Result of classifying one interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    /// Phase assigned to the interval.
    pub phase: PhaseId,
    /// Distance between this interval's signature and the previous one.
    pub distance: f64,
    /// How the phase got there.
    pub event: PhaseEvent,
}

/// Signature stability tracker and learned-phase table.
#[derive(Debug, Clone)]
pub struct PhaseClassifier {
    threshold: f64,
    stable_min: u32,
    stable_count: u32,
    phase: PhaseId,
    last: Signature,
    table: Vec<Signature>,
    history: Vec<PhaseId>,
}

impl PhaseClassifier {
    /// Creates a classifier with no learned phases.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Distances strictly below this count as similar.
    /// * `stable_min` - Consecutive similar intervals needed to learn a phase.
    pub const fn new(threshold: f64, stable_min: u32) -> Self {
        Self {
            threshold,
            stable_min,
            stable_count: 0,
            phase: PhaseId::UNKNOWN,
            last: Signature::new(),
            table: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Classifies one finished interval.
    ///
    /// The signature becomes the reference for the next interval and the assigned
    /// phase is appended to the history.
    pub fn classify(&mut self, current: Signature) -> Classification {
        let distance = current.distance(&self.last);

        let event = if distance < self.threshold {
            self.stable_count += 1;
            if self.stable_count >= self.stable_min && !self.phase.is_known() {
                self.table.push(current);
                self.phase = PhaseId::from_index(self.table.len() - 1);
                debug!(phase = %self.phase, stable = self.stable_count, "learned new phase");
                PhaseEvent::Learned
            } else if self.phase.is_known() {
                PhaseEvent::Continued
            } else {
                PhaseEvent::Unknown
            }
        } else {
            self.stable_count = 0;
            self.phase = self.best_match(&current).unwrap_or(PhaseId::UNKNOWN);
            if self.phase.is_known() {
                debug!(phase = %self.phase, distance, "re-entered known phase");
                PhaseEvent::Reentered
            } else {
                PhaseEvent::Unknown
            }
        };

        self.history.push(self.phase);
        self.last = current;

        Classification {
            phase: self.phase,
            distance,
            event,
        }
    }

    /// Finds the learned phase closest to `sig` that lies within the threshold.
    ///
    /// Strictly-smaller comparisons keep the earliest index on ties.
    fn best_match(&self, sig: &Signature) -> Option<PhaseId> {
        let mut best: Option<(usize, f64)> = None;
        for (index, entry) in self.table.iter().enumerate() {
            let d = sig.distance(entry);
            let bound = best.map_or(self.threshold, |(_, b)| b);
            if d < self.threshold && d < bound {
                best = Some((index, d));
            }
        }
        best.map(|(index, _)| PhaseId::from_index(index))
    }

    /// The phase assigned to the most recent interval.
    pub const fn phase(&self) -> PhaseId {
        self.phase
    }

    /// Consecutive similar intervals seen so far.
    pub const fn stable_count(&self) -> u32 {
        self.stable_count
    }

    /// Number of distinct phases learned.
    pub fn phase_count(&self) -> usize {
        self.table.len()
    }

    /// Learned phase signatures, indexed by phase id.
    pub fn table(&self) -> &[Signature] {
        &self.table
    }

    /// Phase assigned to each interval, in order.
    pub fn history(&self) -> &[PhaseId] {
        &self.history
    }

    /// Signature of the most recently classified interval.
    pub const fn last_signature(&self) -> &Signature {
        &self.last
    }

    /// Similarity cutoff in use.
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Stability requirement in use.
    pub const fn stable_min(&self) -> u32 {
        self.stable_min
    }
}
