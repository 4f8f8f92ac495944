//! Process-wide engine handle and convenience macros.
//!
//! The handle is installed exactly once: either explicitly via [`init`], or
//! lazily with default configuration on the first [`get`]. There is no
//! replace-after-init path; reconfiguration requires owning a [`LogEngine`]
//! directly.

use crate::config::core::{ConfigError, LogConfig};
use crate::engine::logger::LogEngine;
use once_cell::sync::OnceCell;
use thiserror::Error;

static GLOBAL_ENGINE: OnceCell<LogEngine> = OnceCell::new();

/// Installs the process-wide engine. Fails if one is already installed
/// (including the lazily constructed default) or if the config is invalid.
pub fn init(config: LogConfig) -> Result<(), GlobalInitError> {
    let engine = LogEngine::new(config)?;
    GLOBAL_ENGINE
        .set(engine)
        .map_err(|_| GlobalInitError::AlreadyInitialized)
}

/// Returns the process-wide engine, installing one with default
/// configuration on first use.
pub fn get() -> &'static LogEngine {
    // The default configuration has non-zero sizes, so construction cannot
    // fail on validation, and without an output file there is nothing to
    // open.
    GLOBAL_ENGINE
        .get_or_init(|| LogEngine::new(LogConfig::default()).expect("default config is valid"))
}

/// Returns the process-wide engine if one has been installed.
pub fn try_get() -> Option<&'static LogEngine> {
    GLOBAL_ENGINE.get()
}

#[derive(Debug, Error)]
pub enum GlobalInitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("global engine already initialized")]
    AlreadyInitialized,
}

/// Submits a formatted record at an explicit level through the global engine.
#[macro_export]
macro_rules! flog {
    ($level:expr, $($arg:tt)*) => {
        $crate::global::get().submit_args($level, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! flog_trace {
    ($($arg:tt)*) => { $crate::flog!($crate::LogLevel::Trace, $($arg)*) };
}

#[macro_export]
macro_rules! flog_debug {
    ($($arg:tt)*) => { $crate::flog!($crate::LogLevel::Debug, $($arg)*) };
}

#[macro_export]
macro_rules! flog_info {
    ($($arg:tt)*) => { $crate::flog!($crate::LogLevel::Info, $($arg)*) };
}

#[macro_export]
macro_rules! flog_warning {
    ($($arg:tt)*) => { $crate::flog!($crate::LogLevel::Warning, $($arg)*) };
}

#[macro_export]
macro_rules! flog_error {
    ($($arg:tt)*) => { $crate::flog!($crate::LogLevel::Error, $($arg)*) };
}

#[macro_export]
macro_rules! flog_critical {
    ($($arg:tt)*) => { $crate::flog!($crate::LogLevel::Critical, $($arg)*) };
}
