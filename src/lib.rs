//! # Lifecycle Reporter - Supervisor Event Logging
//!
//! Renders the lifecycle notifications of a process/service supervisor as
//! structured, leveled log records:
//! - Start, stop, configuration-load, retry and give-up transitions
//! - Signal receipt
//! - Error outcomes escalated to error level (start/stop/load only)
//! - Caller attribution pointing at the supervisor, not the reporter
//!
//! ## Architecture
//!
//! The reporter is a stateless mapping layer between two collaborators:
//! ```text
//!                  ┌──────────────────────┐
//!   Supervisor  →  │  LifecycleReporter   │  →  Logger
//!   (Reporter      │  event → LogRecord   │     (TracingLogger,
//!    contract)     └──────────────────────┘      JsonLogger, ...)
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod logger;
pub mod reporter;
pub mod service;
pub mod types;

// Internal utilities
pub mod observability;

pub use logger::{Field, FieldValue, Level, LogRecord, Logger, LoggerOption};
pub use reporter::{LifecycleReporter, Reporter};
pub use service::{Configurable, Service};
pub use types::{Config, Error, Result, Signal};
