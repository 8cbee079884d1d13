//! Phase detection engine.
//!
//! `PhaseDetector` owns every piece of mutable state: the interval buffer, the
//! signature accumulator, the phase classifier, the prefetch history, and the lists
//! of registered sinks and listeners. Its single mutation entry point is
//! [`PhaseDetector::on_access`], which the host calls sequentially for every cache
//! access notification:
//!
//! ```text
//!   on_access(event)
//!     ├─ ignore Evict / Prefetch
//!     ├─ buffer address, fold into current signature
//!     └─ buffer full?
//!          ├─ classify interval            → phase history, listeners
//!          ├─ stride projection + history  → prefetch sinks
//!          └─ clear buffer
//! ```
//!
//! All interval work runs synchronously inside the call that completes the interval.

use std::fmt;

use tracing::{debug, trace};

use crate::common::data::AccessEvent;
use crate::common::error::ConfigError;
use crate::config::Config;
use crate::phase::{Classification, PhaseClassifier, PhaseEvent, PhaseId, PhaseListener};
use crate::prefetch::{
    IntervalStridePrefetcher, PrefetchHistory, PrefetchRequest, PrefetchSink, StrideOutcome,
};
use crate::signature::SignatureAccumulator;
use crate::stats::{PhaseReport, PhaseStats};

/// Online phase detector and interval stride prefetcher.
pub struct PhaseDetector {
    config: Config,
    /// Addresses of the interval in progress; capacity fixed at `interval_len`.
    interval: Vec<u64>,
    interval_len: usize,
    accumulator: SignatureAccumulator,
    classifier: PhaseClassifier,
    prefetcher: IntervalStridePrefetcher,
    history: PrefetchHistory,
    sinks: Vec<Box<dyn PrefetchSink>>,
    listeners: Vec<Box<dyn PhaseListener>>,
    /// Run statistics.
    pub stats: PhaseStats,
}

impl PhaseDetector {
    /// Builds a detector from a configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`Config::validate`], or
    /// [`ConfigError::IntervalTooLong`] when the interval buffer cannot be allocated;
    /// the engine is not built in either case.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let too_long = ConfigError::IntervalTooLong(config.detector.interval_len);
        let Ok(interval_len) = usize::try_from(config.detector.interval_len) else {
            return Err(too_long);
        };
        let mut interval: Vec<u64> = Vec::new();
        if interval.try_reserve_exact(interval_len).is_err() {
            return Err(too_long);
        }

        debug!(
            interval_len,
            stable_min = config.detector.stable_min,
            threshold = config.detector.threshold,
            block_size = config.prefetch.block_size,
            page_size = config.prefetch.page_size,
            "phase detector created"
        );

        Ok(Self {
            interval,
            interval_len,
            accumulator: SignatureAccumulator::new(config.detector.drop_bits),
            classifier: PhaseClassifier::new(
                config.detector.threshold,
                config.detector.stable_min,
            ),
            prefetcher: IntervalStridePrefetcher::from_config(&config.prefetch),
            history: PrefetchHistory::new(config.prefetch.history_depth),
            sinks: Vec::new(),
            listeners: Vec::new(),
            stats: PhaseStats::default(),
            config,
        })
    }

    /// Handles one cache access notification.
    ///
    /// Evictions and prefetch fills are ignored. Reads and writes are buffered and
    /// folded into the current signature; the access that fills the buffer runs
    /// classification and prefetching before returning.
    ///
    /// # Returns
    ///
    /// The phase assigned to the interval if this access completed one.
    pub fn on_access(&mut self, event: AccessEvent) -> Option<PhaseId> {
        if !event.kind.is_demand() {
            self.stats.ignored += 1;
            return None;
        }

        assert!(
            self.interval.len() < self.interval_len,
            "interval buffer overflow: {} addresses buffered for an interval of {}",
            self.interval.len(),
            self.interval_len
        );

        self.stats.accesses += 1;
        self.interval.push(event.addr);
        self.accumulator.fold(event.addr);

        if self.interval.len() == self.interval_len {
            let phase = self.complete_interval();
            return Some(phase);
        }
        None
    }

    /// Feeds every event of `events` through [`PhaseDetector::on_access`].
    ///
    /// # Returns
    ///
    /// The number of intervals completed.
    pub fn run<I>(&mut self, events: I) -> u64
    where
        I: IntoIterator<Item = AccessEvent>,
    {
        let before = self.stats.intervals;
        for event in events {
            let _ = self.on_access(event);
        }
        self.stats.intervals - before
    }

    /// Registers a sink that receives every dispatched prefetch.
    pub fn register_callback(&mut self, sink: Box<dyn PrefetchSink>) {
        self.sinks.push(sink);
    }

    /// Registers a listener notified of the phase of every interval.
    pub fn register_phase_listener(&mut self, listener: Box<dyn PhaseListener>) {
        self.listeners.push(listener);
    }

    fn complete_interval(&mut self) -> PhaseId {
        let signature = self.accumulator.take();
        let Classification { phase, event, .. } = self.classifier.classify(signature);

        let index = self.stats.intervals;
        self.stats.intervals += 1;
        self.stats.phases = self.classifier.phase_count() as u64;
        match event {
            PhaseEvent::Unknown => self.stats.unknown_intervals += 1,
            PhaseEvent::Reentered => self.stats.phase_reentries += 1,
            PhaseEvent::Learned | PhaseEvent::Continued => {}
        }

        for listener in &mut self.listeners {
            listener.on_phase(index, phase);
        }

        self.issue_prefetch();
        self.interval.clear();
        phase
    }

    fn issue_prefetch(&mut self) {
        let block = match self.prefetcher.propose(&self.interval) {
            StrideOutcome::NoStride => return,
            StrideOutcome::PageLimited { .. } => {
                self.stats.page_limited += 1;
                return;
            }
            StrideOutcome::Candidate { block, .. } => block,
        };
        self.stats.prefetch_candidates += 1;

        if !self.history.admit(block) {
            trace!(block = %block, "prefetch cancelled, line found in recent prefetch history");
            self.stats.history_hits += 1;
            return;
        }

        let request = PrefetchRequest::read_block(block, self.config.prefetch.block_size);
        self.stats.prefetches_issued += 1;
        for sink in &mut self.sinks {
            sink.on_prefetch(&request);
            self.stats.sink_dispatches += 1;
        }
    }

    /// Phase assigned to each completed interval, in order.
    pub fn phase_history(&self) -> &[PhaseId] {
        self.classifier.history()
    }

    /// Phase of the most recently completed interval.
    pub const fn current_phase(&self) -> PhaseId {
        self.classifier.phase()
    }

    /// Number of intervals classified so far.
    pub const fn intervals(&self) -> u64 {
        self.stats.intervals
    }

    /// Number of distinct phases learned so far.
    pub fn phases(&self) -> usize {
        self.classifier.phase_count()
    }

    /// Addresses buffered for the interval in progress.
    pub fn pending(&self) -> &[u64] {
        &self.interval
    }

    /// The phase classifier (table, stability counter, last signature).
    pub const fn classifier(&self) -> &PhaseClassifier {
        &self.classifier
    }

    /// The recent prefetch history.
    pub const fn prefetch_history(&self) -> &PrefetchHistory {
        &self.history
    }

    /// Configuration the engine was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Snapshot of configuration, counters, and phase history for offline analysis.
    pub fn export_history(&self) -> PhaseReport {
        PhaseReport {
            config: self.config.clone(),
            stats: self.stats.clone(),
            history: self.classifier.history().to_vec(),
        }
    }
}

impl fmt::Debug for PhaseDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseDetector")
            .field("config", &self.config)
            .field("pending", &self.interval.len())
            .field("phase", &self.classifier.phase())
            .field("phases", &self.classifier.phase_count())
            .field("sinks", &self.sinks.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
