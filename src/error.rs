//! Error types for strategy loading and deferred method resolution
//!
//! Two families exist and never mix: [`RegistrationError`] aborts the whole
//! `register` call at server start-up, while [`AuthError`] is confined to a
//! single request that invoked a resolved callback.

use thiserror::Error;

/// Which configured callback a dotted path was resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    /// `options.provider.profile`
    Profile,
    /// `options.validateFunc`
    Validate,
}

impl CallbackKind {
    /// Lowercase label used in log records and error messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Validate => "validate",
        }
    }
}

impl std::fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fatal errors raised while registering strategies with the host.
///
/// Any of these aborts the whole `register` call; there is no partial
/// silent success.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// The host already has a strategy under this name. Raised by the host's
    /// own uniqueness check and propagated unchanged.
    #[error("authentication strategy name already exists: {0}")]
    DuplicateStrategy(String),

    /// The configuration for a named strategy is structurally invalid.
    #[error("invalid config for strategy '{strategy}': {reason}")]
    MalformedConfig {
        /// Name of the offending strategy entry.
        strategy: String,
        /// What is invalid about it.
        reason: String,
    },
}

/// Per-request errors produced by resolved callback wrappers.
///
/// These surface through the host's authentication pipeline as a failure of
/// the single request that triggered them; they never affect registration.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The dotted path did not resolve to a callable in the host's method
    /// registry at invocation time.
    #[error("could not find {kind} method {path} in server methods")]
    MissingMethod {
        /// Which callback slot the path was configured for.
        kind: CallbackKind,
        /// The unresolved dotted path, verbatim from the configuration.
        path: String,
    },

    /// A callback reference was invoked while still a dotted path, before
    /// the registrar resolved it into a callable.
    #[error("callback reference '{0}' was never resolved")]
    Unresolved(String),

    /// The resolved method itself reported a failure.
    #[error("method error: {0}")]
    Method(String),

    /// A validate method returned a value that does not match the
    /// expected `{valid, credentials?}` shape.
    #[error("invalid validation outcome: {0}")]
    InvalidOutcome(String),
}

/// Result type for registration-time operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Result type for per-request callback invocation.
pub type AuthResult<T> = Result<T, AuthError>;
