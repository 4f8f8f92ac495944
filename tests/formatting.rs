use framelog::{ClockAnchor, LineFormatter, LogLevel, Record};
use std::time::{Duration, Instant};

fn record_at(timestamp: Instant, level: LogLevel, message: &str, count: usize) -> Record {
    Record {
        timestamp,
        level,
        message: message.to_string(),
        producer: 0xabcd,
        fingerprint: 0,
        count,
    }
}

#[test]
fn line_carries_timestamp_level_thread_and_message() {
    let formatter = LineFormatter::new(ClockAnchor::now());
    let line = formatter.format_line(&record_at(
        Instant::now(),
        LogLevel::Info,
        "present queued",
        1,
    ));

    assert!(line.starts_with('['));
    assert!(line.contains("] [INFO ] [T:abcd] present queued"));
    assert!(line.ends_with("present queued"));

    // `[YYYY-MM-DD HH:MM:SS.mmm]`: 23 characters of timestamp.
    let ts = &line[1..24];
    let bytes = ts.as_bytes();
    assert_eq!(bytes[4], b'-');
    assert_eq!(bytes[7], b'-');
    assert_eq!(bytes[10], b' ');
    assert_eq!(bytes[13], b':');
    assert_eq!(bytes[16], b':');
    assert_eq!(bytes[19], b'.');
    assert_eq!(line.as_bytes()[24], b']');
}

#[test]
fn level_tags_are_column_aligned() {
    let formatter = LineFormatter::new(ClockAnchor::now());
    let now = Instant::now();
    for (level, tag) in [
        (LogLevel::Trace, "[TRACE]"),
        (LogLevel::Debug, "[DEBUG]"),
        (LogLevel::Info, "[INFO ]"),
        (LogLevel::Warning, "[WARN ]"),
        (LogLevel::Error, "[ERROR]"),
        (LogLevel::Critical, "[CRIT ]"),
    ] {
        let line = formatter.format_line(&record_at(now, level, "x", 1));
        assert!(line.contains(tag), "missing {tag} in {line}");
    }
}

#[test]
fn repetition_suffix_appears_only_above_count_one() {
    let formatter = LineFormatter::new(ClockAnchor::now());
    let now = Instant::now();

    let single = formatter.format_line(&record_at(now, LogLevel::Warning, "thermal", 1));
    assert!(!single.contains("repeated"));

    let repeated = formatter.format_line(&record_at(now, LogLevel::Warning, "thermal", 7));
    assert!(repeated.ends_with("thermal (repeated 7 times)"));
}

#[test]
fn message_is_verbatim() {
    let formatter = LineFormatter::new(ClockAnchor::now());
    let message = "odd ] chars [T:ff] \t and \"quotes\"";
    let line = formatter.format_line(&record_at(Instant::now(), LogLevel::Debug, message, 1));
    assert!(line.ends_with(message));
}

#[test]
fn anchor_conversion_is_deterministic() {
    let anchor = ClockAnchor::now();
    let base = anchor.monotonic();

    let at = base + Duration::from_millis(1500);
    let earlier = anchor.to_wall(base);
    let later = anchor.to_wall(at);
    assert_eq!(later - earlier, chrono::Duration::milliseconds(1500));
    // The same instant always converts to the same wall time.
    assert_eq!(later, anchor.to_wall(at));
}
