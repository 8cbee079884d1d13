//! # Workload Generator Tests
//!
//! Exact address sequences for small parameter sets, request-count termination,
//! wrap-around, and pattern parsing.

use phasedet_core::PhaseDetector;
use phasedet_core::common::{AccessEvent, AccessKind, WorkloadError};
use phasedet_core::config::Config;
use phasedet_core::workload::*;
use pretty_assertions::assert_eq;

fn addrs(w: impl Iterator<Item = AccessEvent>) -> Vec<u64> {
    w.map(|e| e.addr).collect()
}

fn small_single(count: u64, max_address: u64) -> SingleStream {
    SingleStream::new(SingleStreamParams {
        count,
        length: 4,
        start: 0,
        max_address,
        arr_gap: 100,
        stride: 1,
        op: AccessKind::Read,
    })
    .unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Single stream
// ══════════════════════════════════════════════════════════

/// Steps inside a burst grow 0, 1, 2, 3; bursts are 100 bytes apart.
#[test]
fn single_stream_sequence() {
    assert_eq!(
        addrs(small_single(10, 1000)),
        vec![0, 1, 3, 6, 106, 107, 109, 112, 212, 213]
    );
}

#[test]
fn single_stream_wraps_to_start() {
    assert_eq!(
        addrs(small_single(10, 150)),
        vec![0, 1, 3, 6, 106, 107, 109, 112, 0, 1]
    );
}

#[test]
fn single_stream_tracks_remaining() {
    let mut w = small_single(10, 1000);
    assert_eq!(w.remaining(), 10);
    let _ = w.next();
    assert_eq!(w.remaining(), 9);
    assert_eq!(w.by_ref().count(), 9);
    assert_eq!(w.remaining(), 0);
    assert_eq!(w.next(), None);
}

#[test]
fn single_stream_issues_configured_op() {
    let mut params = SingleStreamParams::default();
    params.count = 3;
    params.op = AccessKind::Write;
    let w = SingleStream::new(params).unwrap();
    assert!(w.map(|e| e.kind).all(|k| k == AccessKind::Write));
}

#[test]
fn single_stream_rejects_bad_params() {
    let mut params = SingleStreamParams::default();
    params.length = 0;
    assert_eq!(SingleStream::new(params).unwrap_err(), WorkloadError::ZeroLength);

    let mut params = SingleStreamParams::default();
    params.max_address = 0;
    assert_eq!(SingleStream::new(params).unwrap_err(), WorkloadError::ZeroMaxAddress);
}

// ══════════════════════════════════════════════════════════
// 2. Gapped stream
// ══════════════════════════════════════════════════════════

/// Position 2 of each burst steps by the jump instead of the stride.
#[test]
fn gapped_stream_sequence() {
    let w = GappedStream::new(GappedStreamParams {
        count: 8,
        start: 0,
        stop: 1000,
        gap_location: 2,
        gap_jump: 5,
        arr_gap: 100,
        stride: 1,
        length: 4,
    })
    .unwrap();
    assert_eq!(addrs(w), vec![0, 1, 7, 14, 114, 115, 121, 128]);
}

#[test]
fn gapped_stream_rejects_inverted_range() {
    let params = GappedStreamParams {
        start: 10,
        stop: 5,
        ..GappedStreamParams::default()
    };
    assert_eq!(
        GappedStream::new(params).unwrap_err(),
        WorkloadError::InvertedRange { start: 10, stop: 5 }
    );
}

// ══════════════════════════════════════════════════════════
// 3. STREAM replay
// ══════════════════════════════════════════════════════════

/// The -96 delta on an early burst leaves the footprint and resets to 0.
#[test]
fn stream_bench_first_burst() {
    assert_eq!(
        addrs(StreamBench::new(17)),
        vec![
            0, 32, 64, 0, 160, 192, 224, 128, 288, 320, 352, 256, 416, 448, 480, 384, 416
        ]
    );
}

#[test]
fn stream_bench_stays_in_footprint() {
    let w = StreamBench::new(50_000);
    assert!(w.map(|e| e.addr).all(|a| a < stream_bench::MAX_ADDRESS as u64));
}

#[test]
fn stream_bench_default_count() {
    assert_eq!(StreamBench::default().remaining(), stream_bench::DEFAULT_COUNT);
}

// ══════════════════════════════════════════════════════════
// 4. Delta patterns
// ══════════════════════════════════════════════════════════

#[test]
fn pattern_parses_description() {
    let params = PatternParams::parse("Gather,0,8,16,-24,delta:64,count:6").unwrap();
    assert_eq!(params.deltas, vec![0, 8, 16, -24]);
    assert_eq!(params.arr_gap, 64);
    assert_eq!(params.count, 6);
    assert_eq!(params.op, AccessKind::Read);
    assert_eq!(params.max_address, PatternParams::DEFAULT_MAX_ADDRESS);

    assert_eq!(addrs(Pattern::new(params).unwrap()), vec![0, 8, 24, 0, 64, 72]);
}

/// A negative delta larger than the cursor clamps to 0.
#[test]
fn scatter_pattern_clamps_at_zero() {
    let params = PatternParams::parse("Scatter, 16, -100, delta:0, count:2").unwrap();
    let events: Vec<_> = Pattern::new(params).unwrap().collect();
    assert_eq!(
        events,
        vec![AccessEvent::write(16), AccessEvent::write(0)]
    );
}

#[test]
fn malformed_patterns_are_rejected() {
    for bad in [
        "Shuffle,1,delta:1,count:1",
        "Gather,1,delta:1",
        "Gather,x,delta:1,count:1",
        "Gather,1,delta:1,2,count:3",
        "Gather,1,delta:-1,count:3",
    ] {
        assert!(
            matches!(PatternParams::parse(bad), Err(WorkloadError::InvalidPattern(_))),
            "accepted `{bad}`"
        );
    }
}

#[test]
fn pattern_without_deltas_is_empty() {
    let params = PatternParams::parse("Gather,delta:1,count:1").unwrap();
    assert_eq!(Pattern::new(params).unwrap_err(), WorkloadError::EmptyPattern);
}

// ══════════════════════════════════════════════════════════
// 5. Phased composition
// ══════════════════════════════════════════════════════════

#[test]
fn phased_runs_parts_in_order() {
    let w = Phased::default()
        .then(Box::new(small_single(2, 1000)))
        .then(Box::new(StreamBench::new(2)));
    assert_eq!(w.remaining(), 4);
    assert_eq!(w.name(), "phased");
    assert_eq!(addrs(w), vec![0, 1, 0, 32]);
}

/// Two single-stream regions around a STREAM region: the stream region learns its
/// own phase and the second single-stream region re-enters phase 0 immediately.
#[test]
fn phased_workload_reenters_first_phase() {
    let region = |start: u64| {
        SingleStream::new(SingleStreamParams {
            count: 4000,
            length: 8,
            start,
            max_address: start + 400,
            arr_gap: 100,
            stride: 1,
            op: AccessKind::Read,
        })
        .unwrap()
    };
    let w = Phased::new(vec![
        Box::new(region(0x10_0000)),
        Box::new(StreamBench::new(4000)),
        Box::new(region(0x10_0000)),
    ]);

    let mut config = Config::default();
    config.detector.interval_len = 400;
    config.detector.stable_min = 2;
    let mut d = PhaseDetector::new(config).unwrap();
    assert_eq!(d.run(w), 30);

    let history: Vec<i32> = d.phase_history().iter().map(|p| p.raw()).collect();
    assert_eq!(&history[..3], &[-1, -1, 0]);
    assert_eq!(&history[10..13], &[-1, -1, 1]);
    assert!(history[20..].iter().all(|&p| p == 0));
    assert_eq!(d.phases(), 2);
    assert_eq!(d.stats.phase_reentries, 1);
}
