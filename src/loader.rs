//! Strategy Registrar
//!
//! The plugin entry point: walk the configured strategies in map order,
//! resolve string-named callback references into late-bound wrappers, and
//! hand each strategy to the host's authentication subsystem.
//!
//! Resolution is deliberately deferred. A wrapper captures the host handle
//! and the dotted path, not the method itself, and queries the live method
//! registry on every invocation; the registry may gain or lose entries
//! between registration and the first request. A path that fails to resolve
//! at invocation time is logged against the host's `["error",
//! "strategy-loader"]` channel and surfaces as a per-request authentication
//! failure, never as a registration failure and never as a panic.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::config::{LoaderConfig, StrategyConfig};
use crate::error::{AuthError, CallbackKind, RegistrationError, RegistrationResult};
use crate::host::StrategyHost;
use crate::types::{CallbackRef, ServerMethod};

/// Log tag applied to every record this crate emits through the host.
pub const LOG_TAG: &str = "strategy-loader";

/// Plugin metadata exposed to the host's plugin framework.
///
/// `once` declares the register-only-once contract: the host's plugin loader
/// owns the one-shot guard and must not invoke [`register`] twice per server
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDefinition {
    /// Plugin name, also the log tag.
    pub name: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Whether the host may register this plugin more than once.
    pub once: bool,
}

/// This crate's plugin definition.
#[must_use]
pub fn plugin() -> PluginDefinition {
    PluginDefinition {
        name: LOG_TAG,
        version: env!("CARGO_PKG_VERSION"),
        once: true,
    }
}

/// Register every configured strategy with the host, in map order.
///
/// For each entry: validate the entry's structure, optionally emit a verbose
/// log record, replace string-named `provider.profile` / `validateFunc`
/// references with late-bound wrappers, call the host's strategy
/// registration, and apply the default-strategy rule.
///
/// The default rule: when any entry sets `default: true`, only flagged
/// entries are marked as default (the last flagged entry wins); with no
/// flags at all, every entry is marked, so the last registered strategy
/// becomes the default.
///
/// # Errors
/// Returns [`RegistrationError::MalformedConfig`] for an entry with an empty
/// name or scheme, and propagates any failure of the host's own
/// registration call (duplicate strategy names in particular) unchanged.
/// A failure aborts the whole call; there is no partial silent success.
pub fn register(server: &Arc<dyn StrategyHost>, config: LoaderConfig) -> RegistrationResult<()> {
    let explicit_default = config.strategies.has_explicit_default();

    for (name, mut strategy) in config.strategies {
        validate_entry(&name, &strategy)?;

        if config.verbose {
            server.log(
                &[LOG_TAG],
                json!({
                    "message": "strategy loaded",
                    "strategy": &name,
                    "options": &strategy,
                }),
            );
        }

        if let Some(provider) = strategy.options.provider.as_mut()
            && let Some(path) = provider
                .profile
                .as_ref()
                .and_then(CallbackRef::as_named)
                .map(String::from)
        {
            provider.profile = Some(CallbackRef::Direct(late_bound(
                server,
                CallbackKind::Profile,
                path,
            )));
        }

        if let Some(path) = strategy
            .options
            .validate_func
            .as_ref()
            .and_then(CallbackRef::as_named)
            .map(String::from)
        {
            strategy.options.validate_func = Some(CallbackRef::Direct(late_bound(
                server,
                CallbackKind::Validate,
                path,
            )));
        }

        debug!(strategy = %name, scheme = %strategy.scheme, "registering auth strategy");
        server.register_strategy(&name, &strategy.scheme, strategy.mode, strategy.options)?;

        if strategy.default || !explicit_default {
            server.set_default_strategy(&name);
        }
    }

    Ok(())
}

fn validate_entry(name: &str, strategy: &StrategyConfig) -> RegistrationResult<()> {
    if name.trim().is_empty() {
        return Err(RegistrationError::MalformedConfig {
            strategy: name.to_string(),
            reason: "strategy name must not be empty".to_string(),
        });
    }
    if strategy.scheme.trim().is_empty() {
        return Err(RegistrationError::MalformedConfig {
            strategy: name.to_string(),
            reason: "scheme must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Build a wrapper that resolves `path` against the host's *current* method
/// registry at every invocation and delegates with identical arguments.
fn late_bound(server: &Arc<dyn StrategyHost>, kind: CallbackKind, path: String) -> ServerMethod {
    let server = Arc::clone(server);
    Arc::new(move |args| {
        let server = Arc::clone(&server);
        let path = path.clone();
        Box::pin(async move {
            match server.methods().lookup(&path) {
                Some(method) => method(args).await,
                None => {
                    let err = AuthError::MissingMethod {
                        kind,
                        path: path.clone(),
                    };
                    server.log(
                        &["error", LOG_TAG],
                        json!({ "message": err.to_string(), "method": path }),
                    );
                    Err(err)
                }
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MethodRegistry;

    use serde_json::{Value, json};

    /// Host double that accepts everything and records nothing.
    struct NullHost {
        methods: Arc<crate::registry::MethodTable>,
    }

    impl NullHost {
        fn new() -> Arc<dyn StrategyHost> {
            Arc::new(Self {
                methods: Arc::new(crate::registry::MethodTable::new()),
            })
        }
    }

    impl StrategyHost for NullHost {
        fn methods(&self) -> Arc<dyn MethodRegistry> {
            self.methods.clone()
        }

        fn log(&self, _tags: &[&str], _payload: Value) {}

        fn register_strategy(
            &self,
            _name: &str,
            _scheme: &str,
            _mode: crate::config::AuthMode,
            _options: crate::config::StrategyOptions,
        ) -> RegistrationResult<()> {
            Ok(())
        }

        fn set_default_strategy(&self, _name: &str) {}
    }

    fn strategy(value: Value) -> StrategyConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_scheme_fails_fast() {
        let server = NullHost::new();
        let mut config = LoaderConfig::default();
        config
            .strategies
            .insert("session", strategy(json!({ "scheme": "" })));

        let err = register(&server, config).unwrap_err();
        match err {
            RegistrationError::MalformedConfig { strategy, reason } => {
                assert_eq!(strategy, "session");
                assert!(reason.contains("scheme"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_name_fails_fast() {
        let server = NullHost::new();
        let mut config = LoaderConfig::default();
        config
            .strategies
            .insert("", strategy(json!({ "scheme": "cookie" })));

        assert!(matches!(
            register(&server, config),
            Err(RegistrationError::MalformedConfig { .. })
        ));
    }

    #[test]
    fn test_empty_config_is_a_noop() {
        let server = NullHost::new();
        register(&server, LoaderConfig::default()).unwrap();
    }

    #[test]
    fn test_plugin_definition() {
        let def = plugin();
        assert_eq!(def.name, "strategy-loader");
        assert!(def.once);
        assert_eq!(def.version, env!("CARGO_PKG_VERSION"));
    }
}
