//! Rolling Logger
//!
//! A `tracing` layer that keeps the most recent log entries in a circular
//! buffer and forwards every entry to a sink (e.g. the browser console).
//! The buffer can be dumped at any time for a "download logs" action.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Default number of entries kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

/// A single captured log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<5} [{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Shared handle to the circular buffer
#[derive(Clone, Debug)]
pub struct LogBuffer {
    inner: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an entry, evicting the oldest one when full
    pub fn push(&self, entry: LogEntry) {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.len() == self.capacity {
            guard.pop_front();
        }
        guard.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.inner
            .lock()
            .map(|g| g.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All entries rendered one per line
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for entry in self.entries() {
            let _ = writeln!(out, "{}", entry);
        }
        out
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.clear();
        }
    }
}

/// Output target for every captured entry
pub type Sink = Box<dyn Fn(&LogEntry) + Send + Sync>;

/// `tracing` layer writing into a [`LogBuffer`]
pub struct RollingLayer {
    buffer: LogBuffer,
    max_level: Level,
    sink: Option<Sink>,
}

impl RollingLayer {
    pub fn new(buffer: LogBuffer, max_level: Level) -> Self {
        Self {
            buffer,
            max_level,
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sink = Some(sink);
        self
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() > self.max_level {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            timestamp: Local::now(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message: visitor.finish(),
        };

        if let Some(sink) = &self.sink {
            sink(&entry);
        }
        self.buffer.push(entry);
    }
}

/// Collects the `message` field first, other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            if !self.fields.is_empty() {
                self.fields.push(' ');
            }
            let _ = write!(self.fields, "{}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            if !self.fields.is_empty() {
                self.fields.push(' ');
            }
            let _ = write!(self.fields, "{}={:?}", field.name(), value);
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to install logger: {0}")]
pub struct InitError(String);

/// Install the rolling layer as the global subscriber
///
/// Returns the buffer handle so callers can dump it later.
pub fn init(capacity: usize, max_level: Level, sink: Sink) -> Result<LogBuffer, InitError> {
    let buffer = LogBuffer::new(capacity);
    let layer = RollingLayer::new(buffer.clone(), max_level).with_sink(sink);
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::set_global_default(subscriber).map_err(|e| InitError(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Local::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_init_error_message() {
        let err = InitError("already set".to_string());
        assert_eq!(err.to_string(), "failed to install logger: already set");
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let buffer = LogBuffer::new(2);
        buffer.push(entry("a"));
        buffer.push(entry("b"));
        buffer.push(entry("c"));

        let messages: Vec<String> = buffer.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let buffer = LogBuffer::new(0);
        buffer.push(entry("x"));
        buffer.push(entry("y"));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.capacity(), 1);
    }

    #[test]
    fn test_dump_one_line_per_entry() {
        let buffer = LogBuffer::new(10);
        buffer.push(entry("first"));
        buffer.push(entry("second"));
        let dump = buffer.dump();
        assert_eq!(dump.lines().count(), 2);
        assert!(dump.lines().next().unwrap().ends_with("[test] first"));
    }

    #[test]
    fn test_layer_captures_events_and_filters_level() {
        let buffer = LogBuffer::new(10);
        let forwarded = Arc::new(AtomicUsize::new(0));
        let counter = forwarded.clone();
        let layer = RollingLayer::new(buffer.clone(), Level::INFO).with_sink(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(count = 3, "saved cards");
            tracing::debug!("dropped");
            tracing::warn!("storage full");
        });

        let entries = buffer.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "saved cards count=3");
        assert_eq!(entries[1].level, Level::WARN);
        assert_eq!(forwarded.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clear() {
        let buffer = LogBuffer::new(3);
        buffer.push(entry("a"));
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
