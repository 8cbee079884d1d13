//! Phase identification.
//!
//! This module contains the phase identifier type, the stability classifier that
//! assigns one to every interval, and the listener interface through which timing
//! models downstream learn about the current phase.

/// Signature stability tracking and the learned-phase table.
pub mod classifier;

pub use self::classifier::{Classification, PhaseClassifier, PhaseEvent};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::constants::UNKNOWN_PHASE;

/// Identifier of a learned phase, or unknown.
///
/// A known id is the index of the phase in the classifier's table. Unknown is
/// encoded as `-1`, which is also how ids appear in exported histories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseId(i32);

impl PhaseId {
    /// No phase is active.
    pub const UNKNOWN: Self = Self(UNKNOWN_PHASE);

    /// The id of the phase at `index` in the phase table.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit the `i32` encoding.
    pub fn from_index(index: usize) -> Self {
        let raw = i32::try_from(index).unwrap_or_else(|_| panic!("phase index {index} overflows"));
        Self(raw)
    }

    /// Returns `true` unless this is [`PhaseId::UNKNOWN`].
    #[inline]
    pub const fn is_known(self) -> bool {
        self.0 >= 0
    }

    /// The phase-table index, if a phase is active.
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Raw encoding (`-1` for unknown).
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl Default for PhaseId {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl From<PhaseId> for i32 {
    fn from(id: PhaseId) -> Self {
        id.0
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("unknown")
        }
    }
}

/// Receives the phase assigned to every completed interval.
///
/// Listeners are invoked synchronously from inside the engine and must not call
/// back into it.
pub trait PhaseListener {
    /// Called once per interval, after classification.
    ///
    /// # Arguments
    ///
    /// * `interval` - Zero-based index of the interval that just completed.
    /// * `phase` - The phase assigned to it.
    fn on_phase(&mut self, interval: u64, phase: PhaseId);
}
