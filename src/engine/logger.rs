use crate::config::core::{ConfigError, LogConfig};
use crate::engine::buffer::RecordBuffer;
use crate::engine::dedup::{DedupCache, DedupDecision};
use crate::engine::stats::EngineStats;
use crate::model::fingerprint::fingerprint;
use crate::model::level::LogLevel;
use crate::model::record::Record;
use crate::output::clock::ClockAnchor;
use crate::output::format::LineFormatter;
use crate::output::sink::{BatchSink, ConsoleSink, ErrorSink, FileSink};
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Capacity of the per-thread scratch string used by formatted submissions.
/// Renders longer than this are truncated silently.
const FORMAT_SCRATCH_BYTES: usize = 4096;

thread_local! {
    static FORMAT_SCRATCH: RefCell<String> =
        RefCell::new(String::with_capacity(FORMAT_SCRATCH_BYTES));
}

/// Multi-producer buffered logging engine.
///
/// Producers call [`submit`](Self::submit) (or the level convenience
/// methods) from any thread; records accumulate in a double buffer and are
/// drained to the configured sinks in the background, either by a dedicated
/// drainer thread (`async_flush`) or inline when back-pressure or an
/// explicit flush demands it.
///
/// `submit` never blocks on sink I/O. It may briefly block on the buffer
/// mutex, bounded by the time to push one record and, rarely, to swap the
/// two buffers.
pub struct LogEngine {
    shared: Arc<EngineShared>,
    drainer: Mutex<Option<thread::JoinHandle<()>>>,
}

struct EngineShared {
    flush_interval: Duration,
    async_flush: bool,
    min_level: AtomicU8,
    dedup_enabled: AtomicBool,
    shutdown: AtomicBool,
    /// Buffer and dedup state share one critical section: the probe is short
    /// (one map lookup and at most one ring write) and a single mutex avoids
    /// a two-lock ordering problem on the submission path.
    ingest: Mutex<IngestState>,
    signal: FlushSignal,
    /// Sinks and formatter. Doubles as the drain lock: it is taken before the
    /// buffer swap so batch order equals swap order across concurrent drains.
    outputs: Mutex<OutputState>,
    stats: EngineStats,
    errors: ErrorSink,
}

struct IngestState {
    buffer: RecordBuffer,
    dedup: DedupCache,
}

struct FlushSignal {
    state: Mutex<SignalState>,
    cv: Condvar,
}

struct SignalState {
    flush_requested: bool,
    shutdown: bool,
}

struct OutputState {
    formatter: LineFormatter,
    file: Option<FileSink>,
    console: Option<ConsoleSink>,
    callback: Option<Box<dyn BatchSink>>,
}

impl LogEngine {
    /// Builds an engine from a validated configuration.
    ///
    /// A file sink that fails to open degrades the engine (no file output)
    /// and is reported once to standard error; only invalid sizes reject
    /// construction.
    pub fn new(config: LogConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let errors = ErrorSink;
        let file = match config.output_file.as_deref() {
            Some(path) => match FileSink::open(path) {
                Ok(sink) => Some(sink),
                Err(err) => {
                    errors.report(&format!(
                        "framelog: failed to open log file {}: {err}",
                        path.display()
                    ));
                    None
                }
            },
            None => None,
        };
        let console = config.console_output.then(ConsoleSink::new);

        let shared = Arc::new(EngineShared {
            flush_interval: config.flush_interval(),
            async_flush: config.async_flush,
            min_level: AtomicU8::new(config.min_level.ordinal()),
            dedup_enabled: AtomicBool::new(config.enable_deduplication),
            shutdown: AtomicBool::new(false),
            ingest: Mutex::new(IngestState {
                buffer: RecordBuffer::new(config.buffer_size, config.max_memory_bytes),
                dedup: DedupCache::new(config.dedup_window_size, config.dedup_time_window()),
            }),
            signal: FlushSignal {
                state: Mutex::new(SignalState {
                    flush_requested: false,
                    shutdown: false,
                }),
                cv: Condvar::new(),
            },
            outputs: Mutex::new(OutputState {
                formatter: LineFormatter::new(ClockAnchor::now()),
                file,
                console,
                callback: None,
            }),
            stats: EngineStats::default(),
            errors,
        });

        let drainer = if config.async_flush {
            let worker = shared.clone();
            let handle = thread::Builder::new()
                .name("framelog-drain".into())
                .spawn(move || worker.run_drainer())
                .expect("failed to spawn drainer thread");
            Some(handle)
        } else {
            None
        };

        Ok(Self {
            shared,
            drainer: Mutex::new(drainer),
        })
    }

    /// Accepts a record for logging. Never blocks on sink I/O.
    pub fn submit(&self, level: LogLevel, message: impl Into<String>) {
        self.shared.submit(level, message.into());
    }

    /// Formatted-submission entry: renders `args` into a per-thread scratch
    /// string bounded at 4096 bytes (truncating silently), then falls through
    /// to the plain submission. A formatter failure is reported to standard
    /// error and the submission is dropped.
    pub fn submit_args(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if level.ordinal() < self.shared.min_level.load(Ordering::Relaxed) {
            return;
        }
        if self.shared.shutdown.load(Ordering::Relaxed) {
            return;
        }
        FORMAT_SCRATCH.with(|scratch| {
            let mut scratch = scratch.borrow_mut();
            scratch.clear();
            let mut writer = BoundedWriter {
                buf: &mut *scratch,
                limit: FORMAT_SCRATCH_BYTES,
            };
            match fmt::write(&mut writer, args) {
                Ok(()) => {
                    let message = (*scratch).clone();
                    drop(scratch);
                    self.shared.submit(level, message);
                }
                Err(_) => {
                    self.shared
                        .errors
                        .report("framelog: formatted submission failed; record dropped");
                }
            }
        });
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.submit(LogLevel::Trace, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.submit(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.submit(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.submit(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.submit(LogLevel::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.submit(LogLevel::Critical, message);
    }

    /// Requests a drain: signals the drainer in async mode, drains inline in
    /// sync mode.
    pub fn flush(&self) {
        self.shared.request_flush();
    }

    /// Drains inline on the calling thread regardless of mode.
    pub fn force_flush(&self) {
        self.shared.drain();
    }

    /// Lowest level accepted from now on. Safe to call concurrently with
    /// submissions.
    pub fn set_min_level(&self, level: LogLevel) {
        self.shared
            .min_level
            .store(level.ordinal(), Ordering::Relaxed);
    }

    /// Toggles deduplication. Disabling clears the cache; re-enabling starts
    /// empty.
    pub fn set_dedup_enabled(&self, enabled: bool) {
        let was = self.shared.dedup_enabled.swap(enabled, Ordering::Relaxed);
        if was && !enabled {
            self.shared.ingest.lock().unwrap().dedup.clear();
        }
    }

    /// Installs or replaces the callback sink receiving each drained batch.
    pub fn set_batch_sink(&self, sink: impl BatchSink) {
        self.shared.outputs.lock().unwrap().callback = Some(Box::new(sink));
    }

    /// Shared counter handle. Counters may be slightly stale.
    pub fn stats(&self) -> EngineStats {
        self.shared.stats.clone()
    }

    /// Stops the drainer and performs a final inline drain. Idempotent;
    /// subsequent `submit` calls are silent no-ops.
    pub fn shutdown(&self) {
        if self.shared.shutdown.swap(true, Ordering::SeqCst) {
            return;
        }
        {
            let mut state = self.shared.signal.state.lock().unwrap();
            state.shutdown = true;
            self.shared.signal.cv.notify_all();
        }
        if let Some(handle) = self.drainer.lock().unwrap().take() {
            let _ = handle.join();
        }
        self.shared.drain();
    }
}

impl Drop for LogEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl EngineShared {
    fn submit(&self, level: LogLevel, message: String) {
        if level.ordinal() < self.min_level.load(Ordering::Relaxed) {
            return;
        }
        if self.shutdown.load(Ordering::Relaxed) {
            return;
        }

        let dedup_enabled = self.dedup_enabled.load(Ordering::Relaxed);
        let fp = if dedup_enabled {
            fingerprint(level, &message)
        } else {
            0
        };
        let now = Instant::now();

        let flush_needed = {
            let mut ingest = self.ingest.lock().unwrap();
            // Authoritative shutdown check. The final drain's critical
            // section is ordered against this one by the ingest mutex, so a
            // submission either observes the flag here and bails, or
            // completes its push strictly before the final drain swaps the
            // buffer. The pre-lock check above is only a fast path.
            if self.shutdown.load(Ordering::Relaxed) {
                return;
            }
            self.stats.record_submitted();
            if dedup_enabled {
                if let DedupDecision::Suppress = ingest.dedup.probe(fp, now) {
                    self.stats.record_deduplicated();
                    return;
                }
            }
            let record = Record::new(now, level, message, fp, 1);
            let crossed = ingest.buffer.push(record);
            self.stats.set_active_depth(ingest.buffer.len());
            crossed
        };

        if flush_needed {
            self.request_flush();
        }
    }

    fn request_flush(&self) {
        if self.async_flush {
            let mut state = self.signal.state.lock().unwrap();
            state.flush_requested = true;
            self.signal.cv.notify_one();
        } else {
            self.drain();
        }
    }

    /// Drain routine: swap the buffers under the ingest mutex, then format
    /// and dispatch the extracted batch with no locks beyond the drain lock.
    fn drain(&self) {
        let mut outputs = self.outputs.lock().unwrap();

        let batch = {
            let mut ingest = self.ingest.lock().unwrap();
            if ingest.buffer.is_empty() {
                return;
            }
            let batch = ingest.buffer.swap_out();
            self.stats.set_active_depth(0);
            batch
        };

        let mut write_error_reported = false;
        for record in &batch {
            let line = outputs.formatter.format_line(record);
            if let Some(file) = outputs.file.as_mut() {
                if let Err(err) = file.write_line(&line) {
                    if !write_error_reported {
                        self.errors
                            .report(&format!("framelog: file sink write failed: {err}"));
                        write_error_reported = true;
                    }
                }
            }
            if let Some(console) = outputs.console.as_mut() {
                let _ = console.write_line(&line);
            }
        }
        if let Some(file) = outputs.file.as_mut() {
            if let Err(err) = file.flush() {
                if !write_error_reported {
                    self.errors
                        .report(&format!("framelog: file sink flush failed: {err}"));
                }
            }
        }

        if let Some(callback) = outputs.callback.as_mut() {
            if let Err(err) = callback.deliver(&batch) {
                self.errors
                    .report(&format!("framelog: batch sink failed: {err}"));
            }
        }

        self.stats.record_flush(batch.len());
        self.signal.state.lock().unwrap().flush_requested = false;
    }

    /// Drainer thread body: idle on the condition variable with the periodic
    /// deadline as timeout, drain on wakeup, exit on the shutdown signal.
    /// The final drain runs inline on the thread that called `shutdown`.
    fn run_drainer(&self) {
        loop {
            let mut state = self.signal.state.lock().unwrap();
            // Spurious wakeups must not restart the periodic deadline, so
            // each re-entry waits only the remaining budget.
            let idle_start = Instant::now();
            while !state.flush_requested && !state.shutdown {
                let elapsed = idle_start.elapsed();
                if elapsed >= self.flush_interval {
                    break;
                }
                let (next, _timeout) = self
                    .signal
                    .cv
                    .wait_timeout(state, self.flush_interval - elapsed)
                    .unwrap();
                state = next;
            }
            if state.shutdown {
                break;
            }
            state.flush_requested = false;
            drop(state);
            self.drain();
        }
    }
}

/// `fmt::Write` adapter that drops bytes past `limit` instead of failing,
/// keeping truncation on a character boundary.
struct BoundedWriter<'a> {
    buf: &'a mut String,
    limit: usize,
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = self.limit.saturating_sub(self.buf.len());
        if remaining == 0 {
            return Ok(());
        }
        if s.len() <= remaining {
            self.buf.push_str(s);
        } else {
            let mut end = remaining;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            self.buf.push_str(&s[..end]);
        }
        Ok(())
    }
}
