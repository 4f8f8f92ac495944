use framelog::{ConfigError, LogConfig, LogEngine, LogLevel};
use std::io::Write;
use std::time::Duration;

#[test]
fn defaults_match_documented_values() {
    let config = LogConfig::default();
    assert_eq!(config.buffer_size, 10_000);
    assert_eq!(config.max_memory_bytes, 50 * 1024 * 1024);
    assert_eq!(config.flush_interval(), Duration::from_secs(1));
    assert!(config.enable_deduplication);
    assert_eq!(config.dedup_window_size, 1_000);
    assert_eq!(config.dedup_time_window(), Duration::from_secs(5));
    assert_eq!(config.min_level, LogLevel::Debug);
    assert!(config.output_file.is_none());
    assert!(!config.console_output);
    assert!(config.async_flush);
}

#[test]
fn zero_sizes_are_rejected() {
    let config = LogConfig {
        buffer_size: 0,
        ..LogConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroBufferSize)
    ));
    assert!(LogEngine::new(config).is_err());

    let config = LogConfig {
        max_memory_bytes: 0,
        ..LogConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroMemoryBudget)
    ));

    let config = LogConfig {
        dedup_window_size: 0,
        ..LogConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroDedupWindow)
    ));
}

#[test]
fn json_blob_overrides_selected_fields() {
    let config = LogConfig::from_json(
        r#"{"buffer_size": 5, "min_level": "warning", "console_output": true}"#,
    )
    .unwrap();
    assert_eq!(config.buffer_size, 5);
    assert_eq!(config.min_level, LogLevel::Warning);
    assert!(config.console_output);
    // Untouched fields keep their defaults.
    assert_eq!(config.dedup_window_size, 1_000);
}

#[test]
fn json_blob_with_zero_sizes_is_rejected() {
    let err = LogConfig::from_json(r#"{"buffer_size": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroBufferSize));
}

#[test]
fn config_loads_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"flush_interval_ms": 250, "output_file": "frame.log"}}"#
    )
    .unwrap();

    let config = LogConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.flush_interval(), Duration::from_millis(250));
    assert_eq!(
        config.output_file.as_deref().unwrap().to_str(),
        Some("frame.log")
    );
}

#[test]
fn missing_config_file_reports_path() {
    let err = LogConfig::from_json_file("/nonexistent/framelog.json").unwrap_err();
    match err {
        ConfigError::Io { path, .. } => {
            assert!(path.ends_with("framelog.json"));
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn unwritable_output_file_degrades_instead_of_failing() {
    let config = LogConfig {
        output_file: Some("/nonexistent-dir/driver.log".into()),
        async_flush: false,
        ..LogConfig::default()
    };
    // Construction succeeds without a file sink; the failure is reported to
    // stderr out-of-band.
    let engine = LogEngine::new(config).unwrap();
    engine.info("still works");
    engine.force_flush();
    assert_eq!(engine.stats().emitted(), 1);
}
