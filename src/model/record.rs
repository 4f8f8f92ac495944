use crate::model::level::LogLevel;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;
use std::time::Instant;

/// A single log entry captured at submission time.
///
/// Immutable once enqueued into a buffer; the drainer formats and dispatches
/// it without further mutation.
#[derive(Debug, Clone)]
pub struct Record {
    /// Monotonic capture time; converted to wall-clock time by the formatter.
    pub timestamp: Instant,
    pub level: LogLevel,
    pub message: String,
    /// Opaque identifier of the submitting thread, used only for formatting.
    pub producer: u64,
    /// Content fingerprint; zero means "not computed" (dedup disabled).
    pub fingerprint: u32,
    /// Number of occurrences represented, always at least 1. The submission
    /// path constructs records with count 1; the formatter renders a
    /// repetition suffix for any larger value.
    pub count: usize,
}

impl Record {
    /// Captures a record for the calling thread.
    pub fn new(
        timestamp: Instant,
        level: LogLevel,
        message: String,
        fingerprint: u32,
        count: usize,
    ) -> Self {
        Self {
            timestamp,
            level,
            message,
            producer: current_producer_id(),
            fingerprint,
            count,
        }
    }
}

thread_local! {
    static PRODUCER_ID: u64 = hash_thread_id();
}

/// Stable per-thread identifier derived by hashing the thread id.
pub fn current_producer_id() -> u64 {
    PRODUCER_ID.with(|id| *id)
}

fn hash_thread_id() -> u64 {
    let mut hasher = DefaultHasher::new();
    thread::current().id().hash(&mut hasher);
    hasher.finish()
}
