//! Common utilities and types shared by every unit of the detector.
//!
//! This module provides the small building blocks the rest of the crate relies on:
//! 1. **Access Events:** The notification type delivered by the observed cache.
//! 2. **Block Addresses:** Cache-line aligned addresses and page arithmetic.
//! 3. **Constants:** Signature geometry and the unknown-phase encoding.
//! 4. **Error Handling:** Configuration, workload, and trace errors.

/// Block-aligned address type and page helpers.
pub mod addr;

/// Crate-wide constants.
pub mod constants;

/// Memory access event definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::BlockAddr;
pub use constants::{LOG2_SIGNATURE_BITS, SIGNATURE_BITS, SIGNATURE_WORDS};
pub use data::{AccessEvent, AccessKind};
pub use error::{ConfigError, TraceError, WorkloadError};
