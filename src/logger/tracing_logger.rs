//! `tracing` sink.
//!
//! `tracing` field names are fixed at compile time, so the reporter's known
//! keys map to typed fields (`try` is emitted as `try_count`, a keyword
//! cannot be a field name) and anything else is folded into `fields`.

use std::fmt::Write as _;

use super::{Field, FieldValue, Level, LogRecord, Logger, LoggerOption, LoggerState};
use crate::types::Result;

/// Forwards records to the active `tracing` subscriber.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    state: LoggerState,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Record fields split into the typed `tracing` slots.
#[derive(Debug, Default)]
struct Rendered {
    service: Option<String>,
    error: Option<String>,
    try_count: Option<i64>,
    signal: Option<String>,
    extra: String,
}

impl Rendered {
    fn collect<'a>(fields: impl Iterator<Item = &'a Field>) -> Self {
        let mut out = Self::default();
        for field in fields {
            match (&*field.key, &field.value) {
                ("service", value) => out.service = Some(value.to_string()),
                ("error", value) => out.error = Some(value.to_string()),
                ("try", FieldValue::Int(n)) => out.try_count = Some(*n),
                ("signal", value) => out.signal = Some(value.to_string()),
                (key, value) => {
                    if !out.extra.is_empty() {
                        out.extra.push(' ');
                    }
                    // Writing into a String cannot fail.
                    let _ = write!(out.extra, "{}={}", key, value);
                }
            }
        }
        out
    }
}

macro_rules! emit {
    ($level:expr, $rendered:expr, $caller:expr, $message:expr) => {
        tracing::event!(
            $level,
            service = $rendered.service.as_deref(),
            error = $rendered.error.as_deref(),
            try_count = $rendered.try_count,
            signal = $rendered.signal.as_deref(),
            fields = (!$rendered.extra.is_empty()).then_some($rendered.extra.as_str()),
            caller = $caller.as_deref(),
            "{}",
            $message
        )
    };
}

impl Logger for TracingLogger {
    fn log(&self, record: LogRecord) -> Result<()> {
        let rendered = Rendered::collect(self.state.context_for(&record).chain(record.fields.iter()));
        let caller = self
            .state
            .attributes_caller()
            .then(|| record.caller_string());
        let message = &*record.message;

        match record.level {
            Level::Info => emit!(tracing::Level::INFO, rendered, caller, message),
            Level::Error => emit!(tracing::Level::ERROR, rendered, caller, message),
        }
        Ok(())
    }

    fn with_options(mut self, options: Vec<LoggerOption>) -> Self {
        self.state.apply(options);
        self
    }
}
