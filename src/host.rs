//! Host server seam
//!
//! The loader never owns a server; it adapts configuration into calls
//! against these traits. The host exposes its method registry, a tagged
//! structured log channel, the strategy-registration call, and the
//! default-strategy marker. Everything behind the traits (the HTTP server,
//! the auth schemes themselves, duplicate-name validation) stays external.

use std::sync::Arc;

use serde_json::Value;

use crate::config::{AuthMode, StrategyOptions};
use crate::error::RegistrationResult;
use crate::types::ServerMethod;

/// The host's table of named server-side methods.
///
/// Read-only from the loader's perspective. Lookups are late-bound: wrappers
/// query the registry at invocation time, so entries added or removed after
/// registration are observed.
pub trait MethodRegistry: Send + Sync {
    /// Resolve a dotted path (`"a.b.c"`) to a callable, if one exists.
    fn lookup(&self, path: &str) -> Option<ServerMethod>;
}

/// Handle to the host server consumed by [`register`](crate::register).
pub trait StrategyHost: Send + Sync {
    /// The live method registry handle.
    fn methods(&self) -> Arc<dyn MethodRegistry>;

    /// Emit a tagged structured log record. Fire-and-forget.
    fn log(&self, tags: &[&str], payload: Value);

    /// Register a named strategy with the host's authentication subsystem.
    ///
    /// # Errors
    /// The host rejects duplicate strategy names with
    /// [`RegistrationError::DuplicateStrategy`](crate::RegistrationError::DuplicateStrategy);
    /// the loader propagates that failure unchanged.
    fn register_strategy(
        &self,
        name: &str,
        scheme: &str,
        mode: AuthMode,
        options: StrategyOptions,
    ) -> RegistrationResult<()>;

    /// Mark a registered strategy as the server-wide default.
    fn set_default_strategy(&self, name: &str);
}
