//! Memory Access Events.
//!
//! This module defines the notifications the detector receives from the cache it listens to.
//! These types are used for the following:
//! 1. **Filtering:** Only demand reads and writes contribute to signatures and strides.
//! 2. **Workloads:** Synthetic generators and trace files produce the same event type.

use std::fmt;

/// Kind of cache access being reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Demand data read.
    Read,

    /// Demand data write.
    Write,

    /// Line eviction.
    ///
    /// Ignored by the detector.
    Evict,

    /// Prefetch fill issued by some prefetcher.
    ///
    /// Ignored by the detector so its own prefetches do not feed back.
    Prefetch,
}

impl AccessKind {
    /// Returns `true` for demand accesses (reads and writes).
    #[inline]
    pub const fn is_demand(self) -> bool {
        matches!(self, Self::Read | Self::Write)
    }

    /// Single-letter mnemonic used by the text trace format.
    pub const fn mnemonic(self) -> char {
        match self {
            Self::Read => 'R',
            Self::Write => 'W',
            Self::Evict => 'E',
            Self::Prefetch => 'P',
        }
    }

    /// Parses a trace mnemonic (`R`, `W`, `E`, `P`, case-insensitive).
    pub fn from_mnemonic(token: &str) -> Option<Self> {
        match token {
            "R" | "r" => Some(Self::Read),
            "W" | "w" => Some(Self::Write),
            "E" | "e" => Some(Self::Evict),
            "P" | "p" => Some(Self::Prefetch),
            _ => None,
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Evict => "evict",
            Self::Prefetch => "prefetch",
        };
        f.write_str(name)
    }
}

/// A single access notification: the physical address and its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccessEvent {
    /// Physical address of the access. Treated opaquely.
    pub addr: u64,
    /// What the cache did with the address.
    pub kind: AccessKind,
}

impl AccessEvent {
    /// Creates a new access event.
    #[inline]
    pub const fn new(addr: u64, kind: AccessKind) -> Self {
        Self { addr, kind }
    }

    /// Shorthand for a demand read of `addr`.
    #[inline]
    pub const fn read(addr: u64) -> Self {
        Self::new(addr, AccessKind::Read)
    }

    /// Shorthand for a demand write of `addr`.
    #[inline]
    pub const fn write(addr: u64) -> Self {
        Self::new(addr, AccessKind::Write)
    }
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#x}", self.kind.mnemonic(), self.addr)
    }
}
