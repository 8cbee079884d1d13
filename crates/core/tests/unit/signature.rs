//! # Signature Tests
//!
//! Bit hashing and the relative distance between working-set signatures.

use phasedet_core::common::SIGNATURE_BITS;
use phasedet_core::signature::{Signature, SignatureAccumulator, hash_address};
use proptest::prelude::*;

fn sig(bits: &[usize]) -> Signature {
    let mut s = Signature::new();
    for &b in bits {
        s.set(b);
    }
    s
}

// ══════════════════════════════════════════════════════════
// 1. Distance
// ══════════════════════════════════════════════════════════

/// Two empty signatures are identical.
#[test]
fn empty_signatures_have_zero_distance() {
    assert_eq!(Signature::new().distance(&Signature::new()), 0.0);
}

/// Against an empty signature, any non-empty one is maximally distant.
#[test]
fn empty_versus_nonempty_is_one() {
    assert_eq!(sig(&[5]).distance(&Signature::new()), 1.0);
}

#[test]
fn disjoint_signatures_are_one_apart() {
    assert_eq!(sig(&[1, 2]).distance(&sig(&[3, 4])), 1.0);
}

/// {1,2} vs {2,3}: xor has 2 bits, or has 3 bits.
#[test]
fn partial_overlap() {
    let d = sig(&[1, 2]).distance(&sig(&[2, 3]));
    assert!((d - 2.0 / 3.0).abs() < 1e-12, "got {d}");
}

#[test]
fn bits_in_different_words() {
    let d = sig(&[0, 1023]).distance(&sig(&[0, 64]));
    assert!((d - 2.0 / 3.0).abs() < 1e-12, "got {d}");
}

proptest! {
    #[test]
    fn distance_is_symmetric_and_bounded(
        a in prop::collection::vec(0..SIGNATURE_BITS, 0..64),
        b in prop::collection::vec(0..SIGNATURE_BITS, 0..64),
    ) {
        let (sa, sb) = (sig(&a), sig(&b));
        let d = sa.distance(&sb);
        prop_assert!((0.0..=1.0).contains(&d));
        prop_assert_eq!(d, sb.distance(&sa));
        prop_assert_eq!(sa.distance(&sa), 0.0);
    }
}

// ══════════════════════════════════════════════════════════
// 2. Hashing and accumulation
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hash_is_within_signature(addr in any::<u64>(), drop_bits in 0u32..64) {
        prop_assert!(hash_address(addr, drop_bits) < SIGNATURE_BITS);
    }

    #[test]
    fn addresses_sharing_high_bits_share_a_bit(base in any::<u64>(), offset in 0u64..8) {
        let base = base & !7;
        prop_assert_eq!(hash_address(base, 3), hash_address(base | offset, 3));
    }
}

/// Folding the same address twice sets one bit.
#[test]
fn accumulator_is_idempotent_per_address() {
    let mut acc = SignatureAccumulator::new(3);
    acc.fold(0x4000);
    acc.fold(0x4000);
    acc.fold(0x4007);
    assert_eq!(acc.current().count_ones(), 1);
    assert!(acc.current().test(hash_address(0x4000, 3)));
}

#[test]
fn ones_lists_set_bits_in_order() {
    let s = sig(&[700, 3, 64, 3]);
    assert_eq!(s.ones().collect::<Vec<_>>(), vec![3, 64, 700]);
    assert_eq!(Signature::new().ones().count(), 0);
}

#[test]
fn accumulator_uses_configured_drop_bits() {
    let mut acc = SignatureAccumulator::new(6);
    assert_eq!(acc.drop_bits(), 6);
    acc.fold(0x1000);
    assert_eq!(acc.current().ones().collect::<Vec<_>>(), vec![hash_address(0x1000, 6)]);
}

#[test]
fn accumulator_take_starts_fresh() {
    let mut acc = SignatureAccumulator::new(3);
    acc.fold(0x10);
    let first = acc.take();
    assert!(!first.is_empty());
    assert!(acc.current().is_empty());
}
