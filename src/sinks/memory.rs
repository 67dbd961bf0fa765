//! In-memory capture sink
//!
//! Collects every posted record instead of sending it anywhere. The
//! backbone of the test suite, and handy for inspecting what a unit of
//! work would have shipped.

use crate::core::{LogRecord, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Sink that captures `(tag, record)` pairs in memory
#[derive(Clone, Default)]
pub struct MemorySink {
    posted: Arc<Mutex<Vec<(String, LogRecord)>>>,
    closed: Arc<Mutex<bool>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything posted so far, in order.
    pub fn posted(&self) -> Vec<(String, LogRecord)> {
        self.posted.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.posted.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posted.lock().is_empty()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock()
    }

    pub fn clear(&self) {
        self.posted.lock().clear();
    }
}

impl Sink for MemorySink {
    fn post(&self, tag: &str, record: &LogRecord) -> Result<()> {
        self.posted.lock().push((tag.to_string(), record.clone()));
        Ok(())
    }

    fn close(&self) {
        *self.closed.lock() = true;
    }

    fn name(&self) -> &str {
        "memory"
    }
}
