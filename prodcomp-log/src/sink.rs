use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Destination for JSON log entries.
pub trait LogSink {
    fn submit(&self, entry: Value);
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn submit(&self, entry: Value) {
        (**self).submit(entry)
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn submit(&self, entry: Value) {
        (**self).submit(entry)
    }
}

/// Serializes `entry` and hands it to `sink`. A value that fails to serialize
/// is logged and skipped.
pub fn submit_serialized<S, T>(sink: &S, entry: &T)
where
    S: LogSink + ?Sized,
    T: Serialize,
{
    match serde_json::to_value(entry) {
        Ok(value) => sink.submit(value),
        Err(e) => warn!(error = %e, "could not serialize log entry"),
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn submit(&self, _entry: Value) {}
}

/// Keeps entries in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<Value>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Value> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn submit(&self, entry: Value) {
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
