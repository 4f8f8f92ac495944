use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Shared engine counters. Cheap to clone; all counters are monotone and may
/// be slightly stale relative to each other. Never used to drive correctness
/// decisions.
#[derive(Debug, Clone, Default)]
pub struct EngineStats {
    submitted: Arc<AtomicU64>,
    deduplicated: Arc<AtomicU64>,
    emitted: Arc<AtomicU64>,
    flush_cycles: Arc<AtomicU64>,
    active_depth: Arc<AtomicU64>,
    last_flush: Arc<Mutex<Option<Instant>>>,
}

impl EngineStats {
    pub(crate) fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_deduplicated(&self) {
        self.deduplicated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_flush(&self, batch_len: usize) {
        self.emitted.fetch_add(batch_len as u64, Ordering::Relaxed);
        self.flush_cycles.fetch_add(1, Ordering::Relaxed);
        *self.last_flush.lock().unwrap() = Some(Instant::now());
    }

    pub(crate) fn set_active_depth(&self, depth: usize) {
        self.active_depth.store(depth as u64, Ordering::Relaxed);
    }

    /// Records accepted past the level filter, including ones later
    /// suppressed by dedup.
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    pub fn deduplicated(&self) -> u64 {
        self.deduplicated.load(Ordering::Relaxed)
    }

    /// Records delivered to sinks.
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    pub fn flush_cycles(&self) -> u64 {
        self.flush_cycles.load(Ordering::Relaxed)
    }

    /// Depth of the active buffer at the last update.
    pub fn active_depth(&self) -> u64 {
        self.active_depth.load(Ordering::Relaxed)
    }

    pub fn last_flush(&self) -> Option<Instant> {
        *self.last_flush.lock().unwrap()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            submitted: self.submitted(),
            deduplicated: self.deduplicated(),
            emitted: self.emitted(),
            flush_cycles: self.flush_cycles(),
            active_depth: self.active_depth(),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub submitted: u64,
    pub deduplicated: u64,
    pub emitted: u64,
    pub flush_cycles: u64,
    pub active_depth: u64,
}
