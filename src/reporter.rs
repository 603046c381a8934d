//! Lifecycle reporter.
//!
//! Maps supervisor notifications onto structured log records:
//!
//! ```text
//!   before_start(s)         → info  "Starting"                 service
//!   after_start(s, err)     → error "Start failed"             service, error
//!                           | info  "Started"                  service
//!   before_stop(None)       → info  "Stopping services"
//!   before_stop(s)          → info  "Stopping"                 service
//!   after_stop(s, err)      → error "Stop failed"              service, error
//!                           | info  "Stopped"                  service
//!   before_load(c)          → info  "Loading configuration"    service
//!   after_load(c, err)      → error "Load configuration failed" service, error
//!                           | info  "Configuration loaded"     service
//!   before_retry(s, n)      → info  "Retrying service"         service, try
//!   after_give_up(s, n, e)  → info  "Giving up"                service, try, error
//!   signal_received(sig)    → info  "signal received"          signal
//! ```
//!
//! Start/stop notifications without a service are dropped, except
//! `before_stop(None)`, which announces a stop of every service. Load
//! notifications always emit; subjects that are not services are reported
//! as `"unknown"`.
//!
//! `after_give_up` stays at info level even when an error is attached.

use std::error::Error as StdError;
use std::sync::Arc;

use crate::logger::{Field, Level, LogRecord, Logger, LoggerOption};
use crate::service::{resolve_service_name, Configurable, Service};
use crate::types::{ReporterConfig, Signal};

/// Frames between the supervisor's call and the logger: the notification
/// method and `emit`.
pub const REPORTER_CALLER_SKIP: usize = 2;

/// Notification contract invoked by a supervisor around each lifecycle
/// transition.
///
/// Every method is `#[track_caller]`, so implementations can attribute
/// records to the supervisor's call site.
pub trait Reporter: Send + Sync {
    #[track_caller]
    fn before_start(&self, service: Option<&dyn Service>);

    #[track_caller]
    fn after_start(&self, service: Option<&dyn Service>, err: Option<&dyn StdError>);

    #[track_caller]
    fn before_stop(&self, service: Option<&dyn Service>);

    #[track_caller]
    fn after_stop(&self, service: Option<&dyn Service>, err: Option<&dyn StdError>);

    #[track_caller]
    fn before_load(&self, configurable: Option<&dyn Configurable>);

    #[track_caller]
    fn after_load(&self, configurable: Option<&dyn Configurable>, err: Option<&dyn StdError>);

    #[track_caller]
    fn before_retry(&self, service: &dyn Service, try_count: u32);

    #[track_caller]
    fn after_give_up(&self, service: &dyn Service, try_count: u32, err: Option<&dyn StdError>);

    #[track_caller]
    fn signal_received(&self, signal: Signal);
}

/// [`Reporter`] that forwards every notification to a [`Logger`].
///
/// Stateless apart from the bound logger; safe to share across threads
/// whenever the logger is.
#[derive(Debug, Clone)]
pub struct LifecycleReporter<L> {
    logger: L,
}

impl<L: Logger> LifecycleReporter<L> {
    /// Bind `logger`.
    ///
    /// With no options the logger is bound untouched. Otherwise the options
    /// are applied in a single `with_options` call, followed by a caller
    /// skip of [`REPORTER_CALLER_SKIP`].
    pub fn new(logger: L, mut options: Vec<LoggerOption>) -> Self {
        if options.is_empty() {
            return Self { logger };
        }
        options.push(LoggerOption::CallerSkip(REPORTER_CALLER_SKIP));
        Self {
            logger: logger.with_options(options),
        }
    }

    /// Bind `logger` with the context fields from `config`.
    pub fn from_config(logger: L, config: &ReporterConfig) -> Self {
        let mut options = Vec::new();
        if !config.fields.is_empty() {
            let fields = config
                .fields
                .iter()
                .map(|(key, value)| Field::string(key.clone(), value.clone()))
                .collect();
            options.push(LoggerOption::Fields(fields));
        }
        Self::new(logger, options)
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    pub fn into_logger(self) -> L {
        self.logger
    }

    #[track_caller]
    fn emit(&self, level: Level, message: &'static str, fields: Vec<Field>) {
        // Reporting must never destabilize the supervisor.
        if let Err(err) = self.logger.log(LogRecord::new(level, message, fields)) {
            tracing::debug!("lifecycle_report_dropped: message={}, error={}", message, err);
        }
    }

    #[track_caller]
    fn emit_outcome(
        &self,
        service_name: &str,
        err: Option<&dyn StdError>,
        failed: &'static str,
        succeeded: &'static str,
    ) {
        match err {
            Some(err) => self.emit(
                Level::Error,
                failed,
                vec![service_field(service_name), Field::error(err)],
            ),
            None => self.emit(Level::Info, succeeded, vec![service_field(service_name)]),
        }
    }
}

fn service_field(name: &str) -> Field {
    Field::string("service", name)
}

fn try_field(try_count: u32) -> Field {
    Field::int("try", i64::from(try_count))
}

impl<L: Logger> Reporter for LifecycleReporter<L> {
    fn before_start(&self, service: Option<&dyn Service>) {
        let Some(service) = service else { return };
        self.emit(Level::Info, "Starting", vec![service_field(service.name())]);
    }

    fn after_start(&self, service: Option<&dyn Service>, err: Option<&dyn StdError>) {
        let Some(service) = service else { return };
        self.emit_outcome(service.name(), err, "Start failed", "Started");
    }

    fn before_stop(&self, service: Option<&dyn Service>) {
        match service {
            Some(service) => {
                self.emit(Level::Info, "Stopping", vec![service_field(service.name())])
            }
            None => self.emit(Level::Info, "Stopping services", Vec::new()),
        }
    }

    fn after_stop(&self, service: Option<&dyn Service>, err: Option<&dyn StdError>) {
        let Some(service) = service else { return };
        self.emit_outcome(service.name(), err, "Stop failed", "Stopped");
    }

    fn before_load(&self, configurable: Option<&dyn Configurable>) {
        let name = resolve_service_name(configurable);
        self.emit(Level::Info, "Loading configuration", vec![service_field(name)]);
    }

    fn after_load(&self, configurable: Option<&dyn Configurable>, err: Option<&dyn StdError>) {
        let name = resolve_service_name(configurable);
        self.emit_outcome(name, err, "Load configuration failed", "Configuration loaded");
    }

    fn before_retry(&self, service: &dyn Service, try_count: u32) {
        self.emit(
            Level::Info,
            "Retrying service",
            vec![service_field(service.name()), try_field(try_count)],
        );
    }

    fn after_give_up(&self, service: &dyn Service, try_count: u32, err: Option<&dyn StdError>) {
        let mut fields = vec![service_field(service.name()), try_field(try_count)];
        if let Some(err) = err {
            fields.push(Field::error(err));
        }
        self.emit(Level::Info, "Giving up", fields);
    }

    fn signal_received(&self, signal: Signal) {
        self.emit(
            Level::Info,
            "signal received",
            vec![Field::string("signal", signal.to_string())],
        );
    }
}

macro_rules! forward_reporter {
    ($($wrapper:ty),+ $(,)?) => {
        $(
            impl<R: Reporter + ?Sized> Reporter for $wrapper {
                fn before_start(&self, service: Option<&dyn Service>) {
                    (**self).before_start(service)
                }

                fn after_start(&self, service: Option<&dyn Service>, err: Option<&dyn StdError>) {
                    (**self).after_start(service, err)
                }

                fn before_stop(&self, service: Option<&dyn Service>) {
                    (**self).before_stop(service)
                }

                fn after_stop(&self, service: Option<&dyn Service>, err: Option<&dyn StdError>) {
                    (**self).after_stop(service, err)
                }

                fn before_load(&self, configurable: Option<&dyn Configurable>) {
                    (**self).before_load(configurable)
                }

                fn after_load(
                    &self,
                    configurable: Option<&dyn Configurable>,
                    err: Option<&dyn StdError>,
                ) {
                    (**self).after_load(configurable, err)
                }

                fn before_retry(&self, service: &dyn Service, try_count: u32) {
                    (**self).before_retry(service, try_count)
                }

                fn after_give_up(
                    &self,
                    service: &dyn Service,
                    try_count: u32,
                    err: Option<&dyn StdError>,
                ) {
                    (**self).after_give_up(service, try_count, err)
                }

                fn signal_received(&self, signal: Signal) {
                    (**self).signal_received(signal)
                }
            }
        )+
    };
}

forward_reporter!(&R, Box<R>, Arc<R>);
