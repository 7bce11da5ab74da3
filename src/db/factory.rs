//! Settings → connection → ping → [`Repository`].
//!
//! Failures come back in the order they can happen: a configuration error
//! (the first one the builder found), then the driver's connect error, then
//! the driver's ping error. Nothing is retried.

use std::time::Instant;

use opentelemetry::KeyValue;
use secrecy::SecretString;
use sqlx::{Connection, PgConnection};
use tracing::{Instrument, Span};

use super::Repository;
use crate::config::{ConfigSource, ConnectionInfo, ConnectionInfoBuilder, EnvSource};
use crate::error::{ConfigError, Result};
use crate::telemetry::connect::{self as span_helpers, ConnectOutcome};
use crate::telemetry::metrics;

/// One-shot construction of a [`Repository`] from a [`ConfigSource`].
#[derive(Debug, Clone, Default)]
pub struct RepositoryFactory<S = EnvSource> {
    source: S,
}

impl RepositoryFactory<EnvSource> {
    pub fn from_env() -> Self {
        Self::new(EnvSource)
    }
}

impl<S: ConfigSource> RepositoryFactory<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run the builder stages in their fixed order: host and port, then
    /// user and password, then database name.
    pub fn connection_info(&self) -> std::result::Result<ConnectionInfo, ConfigError> {
        ConnectionInfoBuilder::new(&self.source)
            .with_host_and_port()
            .with_user_and_password()
            .with_database_name()
            .build()
    }

    /// The key/value connection string the settings resolve to.
    pub fn connection_string(&self) -> std::result::Result<SecretString, ConfigError> {
        Ok(self.connection_info()?.connection_string())
    }

    /// Resolve settings, open a connection and ping it.
    ///
    /// Configuration errors come back as [`Error::Config`](crate::error::Error::Config);
    /// connect and ping failures as [`Error::Database`](crate::error::Error::Database)
    /// with the driver's error untouched.
    pub async fn connect(&self) -> Result<Repository> {
        let span = span_helpers::start_connect_span();
        let started = Instant::now();

        let (outcome, result) = self.establish(&span).instrument(span.clone()).await;

        span_helpers::record_outcome(&span, outcome);
        let labels = [KeyValue::new("outcome", outcome.as_str())];
        metrics::connect_attempts().add(1, &labels);
        metrics::connect_duration_ms().record(started.elapsed().as_secs_f64() * 1000.0, &labels);

        result
    }

    async fn establish(&self, span: &Span) -> (ConnectOutcome, Result<Repository>) {
        let info = match self.connection_info() {
            Ok(info) => info,
            Err(e) => return (ConnectOutcome::ConfigError, Err(e.into())),
        };
        span_helpers::record_target(span, info.host(), info.port(), info.database_name());
        tracing::debug!(dsn = %info.redacted_connection_string(), "opening postgres connection");

        // Same fields, same fixed sslmode as the connection string.
        let mut connection = match PgConnection::connect_with(&info.connect_options()).await {
            Ok(connection) => connection,
            Err(e) => return (ConnectOutcome::ConnectError, Err(e.into())),
        };

        if let Err(e) = connection.ping().await {
            return (ConnectOutcome::PingError, Err(e.into()));
        }

        tracing::info!(
            host = info.host(),
            port = info.port(),
            dbname = info.database_name(),
            "postgres connection live"
        );
        (ConnectOutcome::Live, Ok(Repository::new(connection)))
    }
}
