//! Subjects of lifecycle notifications.
//!
//! A `Configurable` is not necessarily a `Service`. Whether it is one is a
//! runtime capability probe (`as_service`), not a supertrait relationship.

/// Name reported when a configurable subject is not also a service.
pub const UNKNOWN_SERVICE: &str = "unknown";

/// A named, independently startable/stoppable unit managed by a supervisor.
pub trait Service: Send + Sync {
    fn name(&self) -> &str;
}

/// An entity capable of loading configuration.
pub trait Configurable: Send + Sync {
    /// Returns `Some` when this configurable is also a service.
    fn as_service(&self) -> Option<&dyn Service> {
        None
    }
}

/// Resolve the service name for a configurable subject.
///
/// Falls back to [`UNKNOWN_SERVICE`] when the subject is absent or is not a
/// service.
pub fn resolve_service_name(configurable: Option<&dyn Configurable>) -> &str {
    configurable
        .and_then(|c| c.as_service())
        .map(|s| s.name())
        .unwrap_or(UNKNOWN_SERVICE)
}

impl Service for str {
    fn name(&self) -> &str {
        self
    }
}

impl Service for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
