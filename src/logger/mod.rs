//! Downstream logging contract.
//!
//! The reporter hands fully-formed [`LogRecord`]s to a [`Logger`]. What the
//! logger does with them (formatting, sinks, filtering) is its own business.
//!
//! Sinks shipped with the crate:
//! - [`TracingLogger`]: forwards to the `tracing` ecosystem
//! - [`JsonLogger`]: one JSON object per line on any `io::Write`
//! - [`MemoryLogger`]: captures records for assertions in tests

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use crate::types::Result;

pub mod json;
pub mod memory;
pub mod tracing_logger;

pub use json::JsonLogger;
pub use memory::MemoryLogger;
pub use tracing_logger::TracingLogger;

/// Record severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Error => "error",
        }
    }
}

/// Keys owned by sinks (`ts`, `level`, `msg`, `caller`) or by the reporter's
/// records. Context fields may not use them.
pub const RESERVED_KEYS: &[&str] = &[
    "ts", "level", "msg", "caller", "service", "error", "try", "signal",
];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    /// Rendered with the error's `Display`.
    Error(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) | FieldValue::Error(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
        }
    }
}

/// A key/value pair attached to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: Cow<'static, str>,
    pub value: FieldValue,
}

impl Field {
    pub fn string(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Str(value.into()),
        }
    }

    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Int(value),
        }
    }

    /// The conventional `error` field.
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self {
            key: Cow::Borrowed("error"),
            value: FieldValue::Error(err.to_string()),
        }
    }
}

/// A leveled, structured message.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Level,
    pub message: Cow<'static, str>,
    pub fields: Vec<Field>,
    /// Source location the record is attributed to.
    pub caller: &'static Location<'static>,
}

impl LogRecord {
    /// Build a record attributed to the caller.
    ///
    /// Inside a chain of `#[track_caller]` functions this resolves to the
    /// first caller outside the chain.
    #[track_caller]
    pub fn new(level: Level, message: impl Into<Cow<'static, str>>, fields: Vec<Field>) -> Self {
        Self {
            level,
            message: message.into(),
            fields,
            caller: Location::caller(),
        }
    }

    /// First field with the given key.
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| &f.value)
    }

    /// `file:line` of the attributed caller.
    pub fn caller_string(&self) -> String {
        format!("{}:{}", self.caller.file(), self.caller.line())
    }
}

/// Logger-specific configuration applied through [`Logger::with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggerOption {
    /// Skip this many additional wrapper frames when attributing the call
    /// site. Values accumulate.
    CallerSkip(usize),
    /// Context fields prepended to every record. Fields with a
    /// [reserved key](RESERVED_KEYS) are ignored.
    Fields(Vec<Field>),
}

/// A structured logging collaborator.
///
/// Implementations must be safe to call concurrently.
pub trait Logger: Send + Sync {
    /// Emit one record.
    fn log(&self, record: LogRecord) -> Result<()>;

    /// Return a logger with `options` applied.
    fn with_options(self, options: Vec<LoggerOption>) -> Self
    where
        Self: Sized;

    #[track_caller]
    fn info(&self, message: &'static str, fields: Vec<Field>) -> Result<()> {
        self.log(LogRecord::new(Level::Info, message, fields))
    }

    #[track_caller]
    fn error(&self, message: &'static str, fields: Vec<Field>) -> Result<()> {
        self.log(LogRecord::new(Level::Error, message, fields))
    }
}

/// Accumulated option state shared by the bundled sinks.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoggerState {
    pub(crate) caller_skip: usize,
    pub(crate) context: Vec<Field>,
}

impl LoggerState {
    pub(crate) fn apply(&mut self, options: Vec<LoggerOption>) {
        for option in options {
            match option {
                LoggerOption::CallerSkip(n) => self.caller_skip += n,
                LoggerOption::Fields(fields) => {
                    for field in fields {
                        if is_reserved_key(&field.key) {
                            tracing::warn!("context_field_ignored: key={}", field.key);
                            continue;
                        }
                        self.context.push(field);
                    }
                }
            }
        }
    }

    /// Context fields for `record`, minus any key the record sets itself.
    pub(crate) fn context_for<'a>(
        &'a self,
        record: &'a LogRecord,
    ) -> impl Iterator<Item = &'a Field> + 'a {
        self.context
            .iter()
            .filter(move |f| record.field(&f.key).is_none())
    }

    /// Whether the record's tracked caller should be surfaced.
    pub(crate) fn attributes_caller(&self) -> bool {
        self.caller_skip > 0
    }
}
