//! Detector statistics collection and reporting.
//!
//! This module tracks what the detector did over a run. It provides:
//! 1. **Intervals and phases:** The two monotonically increasing counters exposed to hosts.
//! 2. **Access filtering:** Demand accesses observed versus non-demand notifications ignored.
//! 3. **Prefetching:** Candidates proposed, dispatched, and why the rest were cancelled.
//! 4. **Reports:** A serializable bundle of configuration, counters, and phase history.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::phase::PhaseId;

/// Counters describing one detector run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseStats {
    #[serde(skip, default = "Instant::now")]
    start_time: Instant,
    /// Intervals classified.
    pub intervals: u64,
    /// Distinct phases learned (size of the phase table).
    pub phases: u64,
    /// Read/Write notifications folded into signatures.
    pub accesses: u64,
    /// Evict/Prefetch notifications ignored.
    pub ignored: u64,
    /// Intervals that re-entered a previously learned phase.
    pub phase_reentries: u64,
    /// Intervals classified as unknown.
    pub unknown_intervals: u64,
    /// Stride candidates that passed the page check.
    pub prefetch_candidates: u64,
    /// Candidates that were new and got dispatched.
    pub prefetches_issued: u64,
    /// Candidates cancelled because they crossed a page boundary.
    pub page_limited: u64,
    /// Candidates cancelled because the line was prefetched recently.
    pub history_hits: u64,
    /// Individual sink invocations (issued prefetches times sinks).
    pub sink_dispatches: u64,
}

impl Default for PhaseStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            intervals: 0,
            phases: 0,
            accesses: 0,
            ignored: 0,
            phase_reentries: 0,
            unknown_intervals: 0,
            prefetch_candidates: 0,
            prefetches_issued: 0,
            page_limited: 0,
            history_hits: 0,
            sink_dispatches: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"phase"`, `"prefetch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "phase", "prefetch"];

impl PhaseStats {
    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty
    /// slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let pct = |n: u64, d: u64| {
            if d == 0 {
                0.0
            } else {
                (n as f64 / d as f64) * 100.0
            }
        };

        if want("summary") {
            let rate = if seconds > 0.0 {
                self.accesses as f64 / seconds / 1_000_000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("PHASE DETECTION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("accesses                 {}", self.accesses);
            println!("accesses.ignored         {}", self.ignored);
            println!("access_rate              {rate:.2} M/s");
            println!("----------------------------------------------------------");
        }
        if want("phase") {
            println!("PHASES");
            println!("  num_intervals          {}", self.intervals);
            println!("  num_phases             {}", self.phases);
            println!(
                "  intervals.unknown      {} ({:.2}%)",
                self.unknown_intervals,
                pct(self.unknown_intervals, self.intervals)
            );
            println!("  phase.reentries        {}", self.phase_reentries);
            println!("----------------------------------------------------------");
        }
        if want("prefetch") {
            println!("PREFETCH");
            println!("  pf.candidates          {}", self.prefetch_candidates);
            println!(
                "  pf.issued              {} ({:.2}%)",
                self.prefetches_issued,
                pct(self.prefetches_issued, self.prefetch_candidates)
            );
            println!("  pf.history_hits        {}", self.history_hits);
            println!("  pf.page_limited        {}", self.page_limited);
            println!("  pf.sink_dispatches     {}", self.sink_dispatches);
            println!("==========================================================");
        }
    }

    /// Prints every statistics section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

/// Everything needed to analyse a run offline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseReport {
    /// Configuration the detector ran with.
    pub config: Config,
    /// Counters at the time of export.
    pub stats: PhaseStats,
    /// Phase of each interval, `-1` for unknown.
    pub history: Vec<PhaseId>,
}

impl PhaseReport {
    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
