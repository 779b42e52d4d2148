//! Log output destinations.

use std::cell::RefCell;

use crate::logging::{LogEntry, LogFormat, LogLevel};

/// Destination for rendered log entries.
pub trait LogSink {
    /// Write one entry.
    fn write(&self, entry: &LogEntry, format: LogFormat);
}

/// Writes each entry to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, entry: &LogEntry, format: LogFormat) {
        eprintln!("{}", entry.render(format));
    }
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemorySink {
    /// Snapshot of all recorded entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Messages of all entries at `level`.
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry, _format: LogFormat) {
        self.entries.borrow_mut().push(entry.clone());
    }
}
