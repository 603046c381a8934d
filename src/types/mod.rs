//! Core types for the lifecycle reporter.
//!
//! This module provides foundational types used throughout the crate:
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for observability and the reporter
//! - **Signal**: OS signal identifiers reported by the supervisor

mod config;
mod errors;
mod signal;

pub use config::{Config, ObservabilityConfig, ReporterConfig};
pub use errors::{Error, Result};
pub use signal::Signal;
