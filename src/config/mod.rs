//! Typed configuration from a pluggable source.
//!
//! The process environment is only read through [`EnvSource`], and only
//! at the outermost entry points. Everything else takes a [`ConfigSource`]
//! so it can be driven from an in-memory map.
//! Sensitive values are wrapped in secrecy::SecretString to prevent log leaks.

pub mod connection;

use std::collections::BTreeMap;

pub use connection::{ConnectionInfo, ConnectionInfoBuilder};
pub use secrecy::{ExposeSecret, SecretString};

/// Named settings, looked up one at a time.
pub trait ConfigSource {
    /// The value of `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<String>;
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Reads the process environment.
///
/// In local dev, call `dotenvy::dotenv().ok()` before using this.
/// A value that is not valid unicode counts as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory settings, for tests and for callers that load configuration
/// from somewhere other than the environment.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: BTreeMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a setting.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Settings for the `pgrepo` binary's telemetry, separate from the
/// connection settings so a bad database config still gets logged.
#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl TelemetrySettings {
    pub fn from_source(source: &impl ConfigSource) -> Self {
        Self {
            otel_endpoint: source.get("OTEL_ENDPOINT").filter(|v| !v.is_empty()),
            log_level: source
                .get("LOG_LEVEL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "info".to_string()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_source(&EnvSource)
    }
}
