//! Global subscriber installation runs in its own test binary so it cannot
//! collide with the capturing subscribers used by unit tests.

use lifecycle_reporter::logger::TracingLogger;
use lifecycle_reporter::observability::{init_tracing, LogFormat};
use lifecycle_reporter::types::ObservabilityConfig;
use lifecycle_reporter::{LifecycleReporter, Reporter, Signal};

#[test]
fn test_first_init_stays_in_effect() {
    std::env::remove_var("LIFECYCLE_LOG_FORMAT");

    let first = init_tracing(&ObservabilityConfig::default());
    assert_eq!(first, LogFormat::Compact);

    let second = init_tracing(&ObservabilityConfig {
        log_level: "debug".to_string(),
        json_logs: true,
    });
    assert_eq!(second, LogFormat::Compact);
    assert!(tracing::dispatcher::has_been_set());

    let reporter = LifecycleReporter::new(TracingLogger::new(), Vec::new());
    reporter.signal_received(Signal::SIGINT);
}
