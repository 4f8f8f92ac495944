use chrono::{DateTime, Duration as WallDuration, Local};
use std::time::Instant;

/// Paired monotonic/wall-clock anchor captured once at engine construction.
///
/// Record timestamps are monotonic `Instant`s; human-readable output needs
/// wall-clock time. Capturing both clocks at the same moment lets every later
/// conversion be deterministic: `wall(at) = wall_anchor + (at - mono_anchor)`.
#[derive(Debug, Clone, Copy)]
pub struct ClockAnchor {
    monotonic: Instant,
    wall: DateTime<Local>,
}

impl ClockAnchor {
    pub fn now() -> Self {
        Self {
            monotonic: Instant::now(),
            wall: Local::now(),
        }
    }

    /// Converts a monotonic timestamp to local wall-clock time.
    pub fn to_wall(&self, at: Instant) -> DateTime<Local> {
        if at >= self.monotonic {
            let delta = at.duration_since(self.monotonic);
            self.wall + WallDuration::from_std(delta).unwrap_or_else(|_| WallDuration::zero())
        } else {
            let delta = self.monotonic.duration_since(at);
            self.wall - WallDuration::from_std(delta).unwrap_or_else(|_| WallDuration::zero())
        }
    }

    pub fn monotonic(&self) -> Instant {
        self.monotonic
    }
}
