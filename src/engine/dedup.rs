use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Ring slot value meaning "no fingerprint recorded".
const EMPTY_SLOT: u32 = 0;

/// Result of probing the cache with a record fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupDecision {
    /// Enqueue the record.
    Pass,
    /// Drop the record; an identical one was emitted within the time window.
    Suppress,
}

struct DedupEntry {
    last_seen: Instant,
    count: usize,
}

/// Content-addressed, time-windowed suppressor for near-duplicate records.
///
/// The map is bounded to roughly the ring length: every insertion overwrites
/// one ring slot and lazily removes the displaced fingerprint if its entry
/// has aged out. Correctness does not depend on prompt eviction; a stale
/// entry is re-validated against the time window on its next probe.
pub struct DedupCache {
    entries: HashMap<u32, DedupEntry>,
    ring: Vec<u32>,
    cursor: usize,
    window: Duration,
}

impl DedupCache {
    pub fn new(ring_size: usize, window: Duration) -> Self {
        assert!(ring_size > 0, "dedup ring must have at least one slot");
        Self {
            entries: HashMap::with_capacity(ring_size),
            ring: vec![EMPTY_SLOT; ring_size],
            cursor: 0,
            window,
        }
    }

    /// Decides whether a record with `fingerprint` observed at `now` should
    /// be suppressed, updating suppression counts and the eviction ring.
    pub fn probe(&mut self, fingerprint: u32, now: Instant) -> DedupDecision {
        if let Some(entry) = self.entries.get_mut(&fingerprint) {
            if now.duration_since(entry.last_seen) < self.window {
                entry.count += 1;
                entry.last_seen = now;
                return DedupDecision::Suppress;
            }
        }

        // Fresh observation: insert, or restart an expired entry's window.
        self.entries.insert(
            fingerprint,
            DedupEntry {
                last_seen: now,
                count: 1,
            },
        );

        let displaced = self.ring[self.cursor];
        if displaced != EMPTY_SLOT {
            if let Some(old) = self.entries.get(&displaced) {
                if now.duration_since(old.last_seen) >= self.window {
                    self.entries.remove(&displaced);
                }
            }
        }
        self.ring[self.cursor] = fingerprint;
        self.cursor = (self.cursor + 1) % self.ring.len();

        DedupDecision::Pass
    }

    /// Drops all tracked state; the next probe for any fingerprint passes.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.ring.fill(EMPTY_SLOT);
        self.cursor = 0;
    }

    /// Current number of tracked fingerprints.
    pub fn occupancy(&self) -> usize {
        self.entries.len()
    }

    /// Occurrences recorded for a fingerprint since its window started, or
    /// `None` if it is not tracked.
    pub fn entry_count(&self, fingerprint: u32) -> Option<usize> {
        self.entries.get(&fingerprint).map(|entry| entry.count)
    }

    /// Length of the eviction ring.
    pub fn ring_size(&self) -> usize {
        self.ring.len()
    }
}
