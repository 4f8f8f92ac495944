//! Framelog: a buffered, deduplicating, multi-producer logging core for
//! latency-sensitive host subsystems such as display-driver runtimes.
//!
//! Producers submit free-form text records from any thread; the engine
//! filters by level, collapses near-duplicate content within a time window,
//! accumulates records in a double buffer bounded by count and byte budgets,
//! and drains formatted batches to file, console, and callback sinks on a
//! background thread.

pub mod config {
    pub mod core;

    pub use self::core::*;
}

pub mod model {
    pub mod fingerprint;
    pub mod level;
    pub mod record;

    pub use fingerprint::*;
    pub use level::*;
    pub use record::*;
}

pub mod engine {
    pub mod buffer;
    pub mod dedup;
    pub mod logger;
    pub mod stats;

    pub use buffer::*;
    pub use dedup::*;
    pub use logger::*;
    pub use stats::*;
}

pub mod output {
    pub mod clock;
    pub mod format;
    pub mod sink;

    pub use clock::*;
    pub use format::*;
    pub use sink::*;
}

pub mod global;

pub use config::core::{
    ConfigError, LogConfig, DEFAULT_BUFFER_SIZE, DEFAULT_DEDUP_TIME_WINDOW_MS,
    DEFAULT_DEDUP_WINDOW_SIZE, DEFAULT_FLUSH_INTERVAL_MS, DEFAULT_MAX_MEMORY_BYTES,
};
pub use engine::buffer::RecordBuffer;
pub use engine::dedup::{DedupCache, DedupDecision};
pub use engine::logger::LogEngine;
pub use engine::stats::{EngineStats, StatsSnapshot};
pub use global::GlobalInitError;
pub use model::fingerprint::fingerprint;
pub use model::level::LogLevel;
pub use model::record::{current_producer_id, Record};
pub use output::clock::ClockAnchor;
pub use output::format::LineFormatter;
pub use output::sink::{BatchSink, ConsoleSink, ErrorSink, FileSink, SinkError};
