//! Working-set signatures.
//!
//! A signature is a 1024-bit Bloom-style fingerprint of the addresses touched during
//! one interval. Each address sets exactly one bit, chosen by hashing the address with
//! its low bits dropped. Two signatures are compared by their relative distance:
//!
//! ```text
//!   distance(a, b) = popcount(a ^ b) / popcount(a | b)
//! ```
//!
//! 0 means the same bits are set, 1 means no bit is shared. Collisions are expected;
//! the classifier absorbs them through its similarity threshold.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `fold()`: O(1)
//!   - `distance()`: O(W) where W is the number of backing words (16)
//! - **Space Complexity:** 128 bytes per signature

use std::fmt;

use crate::common::constants::{LOG2_SIGNATURE_BITS, SIGNATURE_BITS, SIGNATURE_WORDS};

/// A fixed-width working-set fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    words: [u64; SIGNATURE_WORDS],
}

impl Signature {
    /// Width of every signature in bits.
    pub const BITS: usize = SIGNATURE_BITS;

    /// Creates an empty signature.
    pub const fn new() -> Self {
        Self {
            words: [0; SIGNATURE_WORDS],
        }
    }

    /// Sets bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Signature::BITS`.
    #[inline]
    pub fn set(&mut self, index: usize) {
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    /// Returns whether bit `index` is set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Signature::BITS`.
    #[inline]
    pub fn test(&self, index: usize) -> bool {
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Returns `true` when no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Clears every bit.
    pub fn clear(&mut self) {
        self.words = [0; SIGNATURE_WORDS];
    }

    /// Relative distance between two signatures, in `[0, 1]`.
    ///
    /// Symmetric difference over union. Two empty signatures are defined to be
    /// identical (distance 0) rather than dividing zero by zero.
    pub fn distance(&self, other: &Self) -> f64 {
        let mut differ = 0u32;
        let mut union = 0u32;
        for (a, b) in self.words.iter().zip(other.words.iter()) {
            differ += (a ^ b).count_ones();
            union += (a | b).count_ones();
        }
        if union == 0 {
            return 0.0;
        }
        f64::from(differ) / f64::from(union)
    }

    /// Iterates over the indices of the set bits, lowest first.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Self::BITS).filter(move |&i| self.test(i))
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("bits_set", &self.count_ones())
            .finish()
    }
}

/// Maps an address to a signature bit index.
///
/// The low `drop_bits` bits are discarded, the remainder is mixed with the
/// SplitMix64 finalizer, and the top `LOG2_SIGNATURE_BITS` bits of the mix select
/// the bit.
#[inline]
pub fn hash_address(addr: u64, drop_bits: u32) -> usize {
    let mut z = (addr >> drop_bits).wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> (64 - LOG2_SIGNATURE_BITS)) as usize
}

/// Builds the signature of the interval in progress.
#[derive(Debug, Clone)]
pub struct SignatureAccumulator {
    current: Signature,
    drop_bits: u32,
}

impl SignatureAccumulator {
    /// Creates an accumulator that drops `drop_bits` low address bits before hashing.
    pub const fn new(drop_bits: u32) -> Self {
        Self {
            current: Signature::new(),
            drop_bits,
        }
    }

    /// Folds one address into the current signature.
    #[inline]
    pub fn fold(&mut self, addr: u64) {
        self.current.set(hash_address(addr, self.drop_bits));
    }

    /// The signature accumulated so far.
    pub const fn current(&self) -> &Signature {
        &self.current
    }

    /// Returns the finished signature and starts a fresh one.
    pub fn take(&mut self) -> Signature {
        std::mem::take(&mut self.current)
    }

    /// Number of low address bits dropped before hashing.
    pub const fn drop_bits(&self) -> u32 {
        self.drop_bits
    }
}
