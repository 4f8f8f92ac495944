use crate::model::level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BUFFER_SIZE: usize = 10_000;
pub const DEFAULT_MAX_MEMORY_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_DEDUP_WINDOW_SIZE: usize = 1_000;
pub const DEFAULT_DEDUP_TIME_WINDOW_MS: u64 = 5_000;

/// Engine configuration. All fields are fixed at construction except
/// `min_level` and `enable_deduplication`, which have runtime setters on the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Max records in the active buffer before an auto-flush is requested.
    pub buffer_size: usize,
    /// Estimated byte ceiling for the active buffer before an auto-flush.
    pub max_memory_bytes: usize,
    /// Periodic drainer deadline.
    pub flush_interval_ms: u64,
    pub enable_deduplication: bool,
    /// Length of the dedup eviction ring.
    pub dedup_window_size: usize,
    /// Suppression horizon for repeated content.
    pub dedup_time_window_ms: u64,
    /// Lowest level accepted by the submission path.
    pub min_level: LogLevel,
    /// Path for the file sink; absent disables file output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    pub console_output: bool,
    /// Runs the drainer on a background thread; when false, back-pressure and
    /// explicit flushes drain inline on the calling thread.
    pub async_flush: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_memory_bytes: DEFAULT_MAX_MEMORY_BYTES,
            flush_interval_ms: DEFAULT_FLUSH_INTERVAL_MS,
            enable_deduplication: true,
            dedup_window_size: DEFAULT_DEDUP_WINDOW_SIZE,
            dedup_time_window_ms: DEFAULT_DEDUP_TIME_WINDOW_MS,
            min_level: LogLevel::Debug,
            output_file: None,
            console_output: false,
            async_flush: true,
        }
    }
}

impl LogConfig {
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }

    pub fn dedup_time_window(&self) -> Duration {
        Duration::from_millis(self.dedup_time_window_ms)
    }

    /// Rejects configurations the engine cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        if self.max_memory_bytes == 0 {
            return Err(ConfigError::ZeroMemoryBudget);
        }
        if self.dedup_window_size == 0 {
            return Err(ConfigError::ZeroDedupWindow);
        }
        Ok(())
    }

    /// Parses a configuration blob from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration blob from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Errors reported once at construction or config load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("buffer_size must be greater than zero")]
    ZeroBufferSize,
    #[error("max_memory_bytes must be greater than zero")]
    ZeroMemoryBudget,
    #[error("dedup_window_size must be greater than zero")]
    ZeroDedupWindow,
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
