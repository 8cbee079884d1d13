//! Block-aligned addresses.
//!
//! This module defines a strong type for cache-line base addresses so the prefetch
//! path cannot accidentally compare an unaligned address against its history. It provides:
//! 1. **Alignment:** Rounding an arbitrary address down to its block boundary.
//! 2. **Page Arithmetic:** Page-number extraction used for the page-boundary check.

use std::fmt;

/// The base address of a cache block.
///
/// Always a multiple of the block size it was built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockAddr(u64);

impl BlockAddr {
    /// Aligns `addr` down to a `block_size` boundary.
    ///
    /// # Arguments
    ///
    /// * `addr` - Any address inside the block.
    /// * `block_size` - Block size in bytes; must be non-zero.
    ///
    /// # Returns
    ///
    /// The base address of the block containing `addr`.
    #[inline(always)]
    pub const fn containing(addr: u64, block_size: u64) -> Self {
        Self(addr - (addr % block_size))
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Returns the page number this block lies in.
    #[inline]
    pub const fn page(self, page_size: u64) -> u64 {
        page_number(self.0, page_size)
    }
}

impl fmt::Display for BlockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Returns the page number of `addr` (`addr / page_size`).
#[inline]
pub const fn page_number(addr: u64, page_size: u64) -> u64 {
    addr / page_size
}

/// Returns `true` when `a` and `b` lie in the same page.
#[inline]
pub const fn same_page(a: u64, b: u64, page_size: u64) -> bool {
    page_number(a, page_size) == page_number(b, page_size)
}
