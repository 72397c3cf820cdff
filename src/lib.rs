//! # Strategy Loader - Declarative Authentication Strategy Registration
//!
//! A configuration-loading plugin for web-server hosts: hand it a declarative
//! map of named authentication strategy configurations and a handle to the
//! host server, and it registers each strategy with the host's
//! authentication subsystem, resolving string-named callback references
//! (a `profile` function and a `validateFunc`) into callables looked up in
//! the host's method registry.
//!
//! ## Design Principles
//!
//! - **Adapter, not engine**: the HTTP server, the auth schemes (cookie,
//!   OAuth-style providers), and duplicate-name validation all live behind
//!   the [`StrategyHost`] seam; this crate only adapts configuration into
//!   registration calls.
//! - **Late binding**: a dotted path like `"session.validate"` is resolved
//!   against the host's *current* method registry at invocation time, not at
//!   registration time. The registry may gain or lose entries in between.
//! - **Deferred, visible failure**: a path that no longer resolves is logged
//!   through the host's `["error", "strategy-loader"]` channel and fails the
//!   single request that triggered it. Registration never fails for a
//!   missing method, and nothing panics.
//!
//! ## Architecture
//!
//! - [`config`] - the declarative configuration model (ordered strategies
//!   map, opaque option bags, callback references)
//! - [`types`] - the uniform [`ServerMethod`] callable type, [`CallbackRef`],
//!   and the validate-outcome shape
//! - [`host`] - the host server seam ([`StrategyHost`], [`MethodRegistry`])
//! - [`registry`] - [`MethodTable`], a nested dotted-path method table
//! - [`loader`] - the registrar: [`register`] and the plugin definition
//! - [`error`] - registration-time and per-request error taxonomies
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use parking_lot::Mutex;
//! use serde_json::{Value, json};
//! use strategy_loader::{
//!     AuthMode, LoaderConfig, MethodRegistry, MethodTable, RegistrationResult, StrategyHost,
//!     StrategyOptions, method, register,
//! };
//!
//! // A minimal host. Real hosts expose their own method registry, log
//! // transport, and auth subsystem here.
//! struct Server {
//!     methods: Arc<MethodTable>,
//!     strategies: Mutex<Vec<String>>,
//!     default_strategy: Mutex<Option<String>>,
//! }
//!
//! impl StrategyHost for Server {
//!     fn methods(&self) -> Arc<dyn MethodRegistry> {
//!         self.methods.clone()
//!     }
//!
//!     fn log(&self, tags: &[&str], payload: Value) {
//!         println!("{tags:?} {payload}");
//!     }
//!
//!     fn register_strategy(
//!         &self,
//!         name: &str,
//!         _scheme: &str,
//!         _mode: AuthMode,
//!         _options: StrategyOptions,
//!     ) -> RegistrationResult<()> {
//!         self.strategies.lock().push(name.to_string());
//!         Ok(())
//!     }
//!
//!     fn set_default_strategy(&self, name: &str) {
//!         *self.default_strategy.lock() = Some(name.to_string());
//!     }
//! }
//!
//! fn main() -> RegistrationResult<()> {
//!     let methods = Arc::new(MethodTable::new());
//!     methods
//!         .register(
//!             "session.validate",
//!             method(|_args| async move { Ok(json!({ "valid": true })) }),
//!         )
//!         .unwrap();
//!
//!     let server: Arc<dyn StrategyHost> = Arc::new(Server {
//!         methods,
//!         strategies: Mutex::new(Vec::new()),
//!         default_strategy: Mutex::new(None),
//!     });
//!
//!     let config: LoaderConfig = serde_json::from_value(json!({
//!         "verbose": true,
//!         "strategies": {
//!             "session": {
//!                 "scheme": "cookie",
//!                 "mode": "try",
//!                 "options": {
//!                     "cookie": "li-sid",
//!                     "isSecure": false,
//!                     "validateFunc": "session.validate"
//!                 }
//!             }
//!         }
//!     }))
//!     .unwrap();
//!
//!     register(&server, config)
//! }
//! ```
//!
//! ## Lifecycle
//!
//! Registration is synchronous, single-pass, and intended to run exactly
//! once at server start-up; [`plugin`] exposes the `once: true` contract the
//! host's plugin framework enforces. The wrapper callables produced during
//! resolution are invoked later, per incoming request, concurrently across
//! requests; each invocation is independent and stateless.

// Submodules
pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod registry;
pub mod types;

// Re-export configuration types
#[doc(inline)]
pub use config::{
    AuthMode, LoaderConfig, ProviderOptions, Strategies, StrategyConfig, StrategyOptions,
};

// Re-export error taxonomy
#[doc(inline)]
pub use error::{AuthError, AuthResult, CallbackKind, RegistrationError, RegistrationResult};

// Re-export the host seam
#[doc(inline)]
pub use host::{MethodRegistry, StrategyHost};

// Re-export the registrar entry point and plugin metadata
#[doc(inline)]
pub use loader::{LOG_TAG, PluginDefinition, plugin, register};

// Re-export the method table
#[doc(inline)]
pub use registry::{MethodTable, MethodTableError};

// Re-export core callable types
#[doc(inline)]
pub use types::{CallbackRef, ServerMethod, ValidationOutcome, method};
