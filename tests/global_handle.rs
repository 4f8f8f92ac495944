use framelog::{flog_info, flog_trace, GlobalInitError, LogConfig, Record, SinkError};
use std::sync::{Arc, Mutex};

// The global handle is process-wide state, so everything lives in one test.
#[test]
fn global_handle_initializes_once_and_serves_macros() {
    assert!(framelog::global::try_get().is_none());

    let captured: Arc<Mutex<Vec<Record>>> = Arc::new(Mutex::new(Vec::new()));
    let writer = captured.clone();
    let engine = framelog::global::get();
    engine.set_batch_sink(move |batch: &[Record]| -> Result<(), SinkError> {
        writer.lock().unwrap().extend_from_slice(batch);
        Ok(())
    });

    flog_info!("frame {} presented", 42);
    // Default minimum level is debug, so trace submissions are filtered.
    flog_trace!("vsync tick");
    engine.force_flush();

    let records = captured.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "frame 42 presented");
    assert_eq!(engine.stats().submitted(), 1);
    drop(records);

    // The lazily installed default engine occupies the slot for good.
    assert!(matches!(
        framelog::global::init(LogConfig::default()),
        Err(GlobalInitError::AlreadyInitialized)
    ));
    assert!(framelog::global::try_get().is_some());
}
