use phasedet_core::PhaseDetector;
use phasedet_core::common::AccessEvent;
use phasedet_core::config::Config;

/// Four addresses whose signature bits never overlap with [`PATTERN_B`].
pub const PATTERN_A: [u64; 4] = [0x1000, 0x1040, 0x1080, 0x10c0];

/// A second working set, disjoint from [`PATTERN_A`] in signature space.
pub const PATTERN_B: [u64; 4] = [0x9000_0000, 0x9000_0040, 0x9000_0080, 0x9000_00c0];

/// Routes `tracing` output to the test writer. Safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("phasedet_core=trace")
        .with_test_writer()
        .try_init();
}

/// Configuration with short intervals so phases form within a few dozen accesses.
pub fn small_config(interval_len: u64, stable_min: u32) -> Config {
    let mut config = Config::default();
    config.detector.interval_len = interval_len;
    config.detector.stable_min = stable_min;
    config
}

/// Builds a detector from [`small_config`].
pub fn detector(interval_len: u64, stable_min: u32) -> PhaseDetector {
    init_logging();
    match PhaseDetector::new(small_config(interval_len, stable_min)) {
        Ok(d) => d,
        Err(e) => panic!("test configuration rejected: {e}"),
    }
}

/// Feeds `pattern` as reads, `times` times over.
pub fn feed(detector: &mut PhaseDetector, pattern: &[u64], times: usize) {
    for _ in 0..times {
        let _ = detector.run(pattern.iter().copied().map(AccessEvent::read));
    }
}
