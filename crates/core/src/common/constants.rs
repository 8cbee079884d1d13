//! Signature geometry and phase encoding constants.

/// Width of a working-set signature in bits.
pub const SIGNATURE_BITS: usize = 1024;

/// Number of `u64` words backing a signature.
pub const SIGNATURE_WORDS: usize = SIGNATURE_BITS / 64;

/// Number of hash bits used to index a signature (`log2(SIGNATURE_BITS)`).
pub const LOG2_SIGNATURE_BITS: u32 = SIGNATURE_BITS.trailing_zeros();

/// Raw encoding of "no phase is active".
pub const UNKNOWN_PHASE: i32 = -1;

const _: () = assert!(SIGNATURE_BITS.is_power_of_two());
const _: () = assert!(SIGNATURE_BITS % 64 == 0);
