//! In-memory sink for tests.
//!
//! Clones share storage, so a test can keep one handle while the reporter
//! owns another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{LogRecord, Logger, LoggerOption, LoggerState};
use crate::types::Result;

#[derive(Debug, Default)]
struct Captured {
    records: Vec<LogRecord>,
    option_calls: Vec<Vec<LoggerOption>>,
}

/// Captures records and `with_options` calls.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    captured: Arc<Mutex<Captured>>,
    state: LoggerState,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn captured(&self) -> MutexGuard<'_, Captured> {
        // A panicking test thread must not hide the records of the others.
        self.captured.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every record logged so far, in arrival order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.captured().records.clone()
    }

    /// Options passed to each `with_options` call, in call order.
    pub fn option_calls(&self) -> Vec<Vec<LoggerOption>> {
        self.captured().option_calls.clone()
    }

    pub fn caller_skip(&self) -> usize {
        self.state.caller_skip
    }

    pub fn clear(&self) {
        self.captured().records.clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, mut record: LogRecord) -> Result<()> {
        if !self.state.context.is_empty() {
            let mut fields: Vec<_> = self.state.context_for(&record).cloned().collect();
            fields.append(&mut record.fields);
            record.fields = fields;
        }
        self.captured().records.push(record);
        Ok(())
    }

    fn with_options(mut self, options: Vec<LoggerOption>) -> Self {
        self.captured().option_calls.push(options.clone());
        self.state.apply(options);
        self
    }
}
