//! Observability utilities.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::types::ObservabilityConfig;

/// Output format of the process-wide subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

static TRACING_INIT: OnceLock<LogFormat> = OnceLock::new();

/// Initialize tracing subscriber once for the process.
///
/// Filter comes from `RUST_LOG`, falling back to `config.log_level`. Output
/// is JSON when `config.json_logs` is set or `LIFECYCLE_LOG_FORMAT=json`,
/// compact text otherwise. The first call decides; later calls leave the
/// subscriber alone and return the format already chosen.
pub fn init_tracing(config: &ObservabilityConfig) -> LogFormat {
    *TRACING_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        let json = config.json_logs
            || std::env::var("LIFECYCLE_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false);

        let (format, result) = if json {
            let result = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init();
            (LogFormat::Json, result)
        } else {
            let result = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact())
                .try_init();
            (LogFormat::Compact, result)
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
        format
    })
}
