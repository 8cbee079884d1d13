use std::cell::RefCell;
use std::rc::Rc;

use mockall::mock;
use phasedet_core::PhaseId;
use phasedet_core::phase::PhaseListener;
use phasedet_core::prefetch::{PrefetchRequest, PrefetchSink};

mock! {
    /// `mockall` double of a prefetch sink.
    pub Sink {}
    impl PrefetchSink for Sink {
        fn on_prefetch(&mut self, request: &PrefetchRequest);
    }
}

/// Sink that records every request into a shared log.
#[derive(Clone, Default)]
pub struct RecordingSink {
    /// Every request received, shared with clones handed to the detector.
    pub requests: Rc<RefCell<Vec<PrefetchRequest>>>,
}

impl RecordingSink {
    /// Creates a sink with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses of the recorded requests, in dispatch order.
    pub fn addrs(&self) -> Vec<u64> {
        self.requests.borrow().iter().map(|r| r.addr).collect()
    }
}

impl PrefetchSink for RecordingSink {
    fn on_prefetch(&mut self, request: &PrefetchRequest) {
        self.requests.borrow_mut().push(*request);
    }
}

/// Listener that records `(interval, phase)` notifications.
#[derive(Clone, Default)]
pub struct RecordingListener {
    /// `(interval, phase)` pairs in notification order.
    pub seen: Rc<RefCell<Vec<(u64, PhaseId)>>>,
}

impl RecordingListener {
    /// Creates a listener with an empty log.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhaseListener for RecordingListener {
    fn on_phase(&mut self, interval: u64, phase: PhaseId) {
        self.seen.borrow_mut().push((interval, phase));
    }
}
