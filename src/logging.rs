//! Logging setup
//!
//! Installs the rolling logger once and keeps its buffer reachable for the
//! "download logs" action.

use std::sync::OnceLock;

use rolling_logger::{LogBuffer, LogEntry};
use tracing::Level;

use crate::config::LOG_CAPACITY;

static BUFFER: OnceLock<LogBuffer> = OnceLock::new();

fn console_sink(entry: &LogEntry) {
    let line = wasm_bindgen::JsValue::from_str(&entry.to_string());
    match entry.level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        _ => web_sys::console::log_1(&line),
    }
}

pub fn init() {
    let max_level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    match rolling_logger::init(LOG_CAPACITY, max_level, Box::new(console_sink)) {
        Ok(buffer) => {
            let _ = BUFFER.set(buffer);
        }
        Err(e) => web_sys::console::error_1(&format!("Logger init failed: {}", e).into()),
    }
}

/// Buffered log lines, oldest first
pub fn dump() -> String {
    BUFFER.get().map(LogBuffer::dump).unwrap_or_default()
}
