//! Core callable and value types
//!
//! The method registry and the resolution wrappers share one uniform callable
//! type, [`ServerMethod`]: an `Arc`'d async function over a vector of JSON
//! arguments. Per-scheme calling conventions (`(credentials, params, get)`
//! for profile callbacks, `(request, session)` for validate callbacks) are
//! argument conventions over that type, which is what lets a wrapper forward
//! its arguments verbatim and return the delegate's result unchanged.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AuthError, AuthResult};

/// A named, invocable server-side function.
///
/// Invocations are independent and stateless; the host's auth pipeline calls
/// these concurrently across requests.
pub type ServerMethod =
    Arc<dyn Fn(Vec<Value>) -> BoxFuture<'static, AuthResult<Value>> + Send + Sync>;

/// Build a [`ServerMethod`] from an async closure.
///
/// Convenience for hosts populating a method table:
///
/// ```
/// use strategy_loader::method;
///
/// let m = method(|args| async move { Ok(args.into_iter().next().unwrap_or_default()) });
/// ```
pub fn method<F, Fut>(f: F) -> ServerMethod
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AuthResult<Value>> + Send + 'static,
{
    Arc::new(move |args| Box::pin(f(args)))
}

/// A configured callback: either a callable, or the dotted path of a method
/// to resolve from the host's method registry.
///
/// Deserialization only ever produces [`CallbackRef::Named`]; `Direct` is
/// constructed programmatically (or by the registrar when it resolves a
/// named reference into a late-bound wrapper).
#[derive(Clone)]
pub enum CallbackRef {
    /// A callable, invoked as-is.
    Direct(ServerMethod),
    /// A dotted path into the host's method registry, e.g. `"users.profile"`.
    Named(String),
}

impl CallbackRef {
    /// Wrap an async closure as a `Direct` reference.
    pub fn direct<F, Fut>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AuthResult<Value>> + Send + 'static,
    {
        Self::Direct(method(f))
    }

    /// The dotted path, if this is still a named reference.
    #[must_use]
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(path) => Some(path),
            Self::Direct(_) => None,
        }
    }

    /// Whether this reference has been resolved to (or was given as) a callable.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Direct(_))
    }

    /// Invoke the callable.
    ///
    /// # Errors
    /// Returns [`AuthError::Unresolved`] if invoked while still a named
    /// reference; resolved and direct references delegate to the callable.
    pub async fn invoke(&self, args: Vec<Value>) -> AuthResult<Value> {
        match self {
            Self::Direct(f) => f(args).await,
            Self::Named(path) => Err(AuthError::Unresolved(path.clone())),
        }
    }
}

impl std::fmt::Debug for CallbackRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("CallbackRef::Direct(<fn>)"),
            Self::Named(path) => write!(f, "CallbackRef::Named({path:?})"),
        }
    }
}

impl Serialize for CallbackRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(path) => serializer.serialize_str(path),
            // Callables have no wire form; logging still needs a marker.
            Self::Direct(_) => serializer.serialize_str("<fn>"),
        }
    }
}

impl<'de> Deserialize<'de> for CallbackRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RefVisitor;

        impl de::Visitor<'_> for RefVisitor {
            type Value = CallbackRef;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a dotted method path string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(CallbackRef::Named(v.to_string()))
            }
        }

        deserializer.deserialize_str(RefVisitor)
    }
}

/// Result shape of a validate callback: whether the session/credential is
/// still valid, and optionally transformed credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationOutcome {
    /// Whether the credential is still valid.
    pub valid: bool,
    /// Replacement credentials, if the method transformed them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
}

impl ValidationOutcome {
    /// Parse a validate method's raw JSON result.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidOutcome`] when the value does not match
    /// the `{valid, credentials?}` shape.
    pub fn from_value(value: Value) -> AuthResult<Self> {
        serde_json::from_value(value).map_err(|e| AuthError::InvalidOutcome(e.to_string()))
    }
}
