use crate::model::record::Record;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;
use thiserror::Error;

/// Failure surfaced by a sink during a flush cycle. Reported out-of-band and
/// never propagated to producers.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink I/O failure: {0}")]
    Io(#[from] io::Error),
    #[error("batch sink failure: {0}")]
    Batch(String),
}

/// Downstream consumer of a drained record batch, invoked only from the
/// drainer after the per-line sinks. Receives a read-only view of the batch
/// and must not retain it beyond the call.
pub trait BatchSink: Send + 'static {
    fn deliver(&mut self, batch: &[Record]) -> Result<(), SinkError>;
}

impl<F> BatchSink for F
where
    F: FnMut(&[Record]) -> Result<(), SinkError> + Send + 'static,
{
    fn deliver(&mut self, batch: &[Record]) -> Result<(), SinkError> {
        self(batch)
    }
}

/// Append-mode text sink over a log file. Owned exclusively by the drainer.
pub struct FileSink {
    writer: BufWriter<std::fs::File>,
}

impl FileSink {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Standard-output sink, enabled by the `console_output` config flag.
pub struct ConsoleSink {
    out: Stdout,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut handle = self.out.lock();
        handle.write_all(line.as_bytes())?;
        handle.write_all(b"\n")
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-line reporter for out-of-band warnings: file-open failures, sink
/// write failures, formatter failures, callback failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorSink;

impl ErrorSink {
    pub fn report(&self, message: &str) {
        eprintln!("{message}");
    }
}
