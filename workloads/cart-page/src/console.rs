//! Browser console log sink.

use turbo_observability::{LogEntry, LogFormat, LogLevel, LogSink};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Writes entries to the devtools console at the matching severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, entry: &LogEntry, format: LogFormat) {
        let line = JsValue::from_str(&entry.render(format));
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => console::debug_1(&line),
            LogLevel::Info => console::info_1(&line),
            LogLevel::Warn => console::warn_1(&line),
            LogLevel::Error => console::error_1(&line),
        }
    }
}
