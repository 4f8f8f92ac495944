use crate::model::record::Record;
use crate::output::clock::ClockAnchor;
use std::fmt::Write as _;

/// Renders records into the one-line text shape consumed by the file and
/// console sinks:
///
/// ```text
/// [YYYY-MM-DD HH:MM:SS.mmm] [LEVEL] [T:<hex thread id>] <message>
/// ```
///
/// with a ` (repeated N times)` suffix when the record represents more than
/// one submission. The message is written verbatim; there are no escape
/// rules.
pub struct LineFormatter {
    anchor: ClockAnchor,
}

impl LineFormatter {
    pub fn new(anchor: ClockAnchor) -> Self {
        Self { anchor }
    }

    pub fn format_line(&self, record: &Record) -> String {
        let wall = self.anchor.to_wall(record.timestamp);
        let mut line = format!(
            "[{}] [{}] [T:{:x}] {}",
            wall.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level.tag(),
            record.producer,
            record.message,
        );
        if record.count > 1 {
            let _ = write!(line, " (repeated {} times)", record.count);
        }
        line
    }
}
