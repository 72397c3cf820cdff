//! Strategy configuration types
//!
//! The configuration is declarative and usually serialized (JSON, YAML via
//! any serde format): a map of named strategy entries, each naming an
//! authentication scheme already known to the host plus an opaque options
//! bag. Two option sub-fields are recognized and may name server methods by
//! dotted path instead of carrying a callable; everything else passes
//! through to the host verbatim.
//!
//! Map order matters: it is the registration order, and it decides which
//! strategy ends up as the server default. [`Strategies`] therefore
//! preserves document order instead of using a hashed map.

use serde::de::{self, Deserializer, MapAccess};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::CallbackRef;

/// Root configuration handed to the registrar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Emit a tagged log record per loaded strategy.
    #[serde(default)]
    pub verbose: bool,
    /// Named strategy entries, in registration order.
    #[serde(default)]
    pub strategies: Strategies,
}

/// How strictly authentication is enforced for a strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Authentication must succeed.
    #[default]
    Required,
    /// Authentication is attempted; the request proceeds either way.
    Optional,
    /// Authentication is attempted and failures are exposed to the handler.
    Try,
}

/// One named strategy entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Name of an authentication scheme already registered with the host.
    pub scheme: String,
    /// Enforcement mode, `required` when omitted.
    #[serde(default)]
    pub mode: AuthMode,
    /// Scheme options, passed through to the host after callback resolution.
    #[serde(default)]
    pub options: StrategyOptions,
    /// Mark this strategy as the server-wide default.
    #[serde(default)]
    pub default: bool,
}

/// The options bag for one strategy.
///
/// `provider.profile` and `validateFunc` are the two recognized sub-fields;
/// all other fields land in `extra` untouched and reach the host exactly as
/// configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyOptions {
    /// Third-party provider settings (OAuth-style schemes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderOptions>,
    /// Session/credential validation callback.
    #[serde(
        rename = "validateFunc",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub validate_func: Option<CallbackRef>,
    /// Everything else, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Provider sub-bag holding the profile callback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderOptions {
    /// Profile callback invoked after successful third-party authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<CallbackRef>,
    /// Remaining provider settings, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An ordered map from strategy name to [`StrategyConfig`].
///
/// Deserialization keeps the document order of the source map, which is the
/// order strategies are registered in.
#[derive(Debug, Clone, Default)]
pub struct Strategies(Vec<(String, StrategyConfig)>);

impl Strategies {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named entry, preserving insertion order.
    pub fn insert(&mut self, name: impl Into<String>, config: StrategyConfig) {
        self.0.push((name.into(), config));
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StrategyConfig)> {
        self.0.iter().map(|(name, config)| (name.as_str(), config))
    }

    /// Number of configured strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no strategies are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any entry carries an explicit `default: true` flag.
    #[must_use]
    pub fn has_explicit_default(&self) -> bool {
        self.0.iter().any(|(_, config)| config.default)
    }
}

impl IntoIterator for Strategies {
    type Item = (String, StrategyConfig);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, StrategyConfig)> for Strategies {
    fn from_iter<I: IntoIterator<Item = (String, StrategyConfig)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Strategies {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, config) in &self.0 {
            map.serialize_entry(name, config)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Strategies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StrategiesVisitor;

        impl<'de> de::Visitor<'de> for StrategiesVisitor {
            type Value = Strategies;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of strategy name to strategy config")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, config)) =
                    access.next_entry::<String, StrategyConfig>()?
                {
                    entries.push((name, config));
                }
                Ok(Strategies(entries))
            }
        }

        deserializer.deserialize_map(StrategiesVisitor)
    }
}
