use framelog::{LogLevel, Record, RecordBuffer};
use std::time::Instant;

fn record(message: &str) -> Record {
    Record::new(Instant::now(), LogLevel::Info, message.to_string(), 0, 1)
}

#[test]
fn count_threshold_triggers_backpressure() {
    let mut buffer = RecordBuffer::new(3, usize::MAX);
    assert!(!buffer.push(record("a")));
    assert!(!buffer.push(record("b")));
    assert!(buffer.push(record("c")));
    assert_eq!(buffer.len(), 3);
}

#[test]
fn byte_threshold_triggers_backpressure() {
    let mut buffer = RecordBuffer::new(usize::MAX, 128);
    let payload = "x".repeat(200);
    assert!(buffer.push(record(&payload)));
    assert!(buffer.estimated_bytes() >= 200);
}

#[test]
fn swap_out_flips_selector_and_preserves_order() {
    let mut buffer = RecordBuffer::new(100, usize::MAX);
    buffer.push(record("first"));
    buffer.push(record("second"));
    assert_eq!(buffer.active_slot(), 0);

    let batch = buffer.swap_out();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].message, "first");
    assert_eq!(batch[1].message, "second");
    assert_eq!(buffer.active_slot(), 1);
    assert!(buffer.is_empty());
    assert_eq!(buffer.estimated_bytes(), 0);

    buffer.push(record("third"));
    let batch = buffer.swap_out();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].message, "third");
    assert_eq!(buffer.active_slot(), 0);
}

#[test]
fn swap_out_of_empty_buffer_yields_empty_batch() {
    let mut buffer = RecordBuffer::new(10, usize::MAX);
    assert!(buffer.swap_out().is_empty());
    assert!(buffer.is_empty());
}
