//! Postgres connection settings and the builder that validates them.
//!
//! The builder runs in stages. Each stage reads its settings, keeps what
//! resolves and records what doesn't, and never stops early, so every
//! problem is collected. [`ConnectionInfoBuilder::build`] then reports only
//! the first one, in stage-call order and field order within a stage.

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use super::{ConfigSource, EnvSource};
use crate::error::ConfigError;

pub const PG_HOST: &str = "PG_HOST";
pub const PG_PORT: &str = "PG_PORT";
pub const PG_USER: &str = "PG_USER";
pub const PG_PASS: &str = "PG_PASS";
pub const PG_DBNAME: &str = "PG_DBNAME";

/// Transport encryption is always off for connections made here.
pub const SSL_MODE: &str = "disable";

/// Fully resolved connection settings. Only [`ConnectionInfoBuilder`]
/// produces one, and only when every field resolved.
#[derive(Debug)]
pub struct ConnectionInfo {
    host: String,
    port: u16,
    user: String,
    password: SecretString,
    database_name: String,
}

impl ConnectionInfo {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Key/value connection string, e.g.
    /// `host=localhost port=5432 user=u password=p dbname=d sslmode=disable`.
    ///
    /// Contains the password, hence the secret wrapper.
    pub fn connection_string(&self) -> SecretString {
        SecretString::from(self.format_dsn(self.password.expose_secret()))
    }

    /// Same as [`connection_string`](Self::connection_string) with the
    /// password masked. Safe to print.
    pub fn redacted_connection_string(&self) -> String {
        self.format_dsn("********")
    }

    /// Driver options carrying exactly the fields of the connection string.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new_without_pgpass()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.database_name)
            .ssl_mode(PgSslMode::Disable)
    }

    fn format_dsn(&self, password: &str) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            self.host, self.port, self.user, password, self.database_name, SSL_MODE
        )
    }
}

/// Collects connection settings from a [`ConfigSource`].
///
/// ```
/// use pg_repository::config::{ConnectionInfoBuilder, MapSource};
/// use pg_repository::error::ConfigError;
///
/// let source = MapSource::new().with("PG_PORT", "abc");
/// let err = ConnectionInfoBuilder::new(source)
///     .with_host_and_port()
///     .with_user_and_password()
///     .with_database_name()
///     .build()
///     .unwrap_err();
/// assert_eq!(err, ConfigError::MissingHost);
/// ```
#[derive(Debug)]
pub struct ConnectionInfoBuilder<S = EnvSource> {
    source: S,
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<SecretString>,
    database_name: Option<String>,
    errors: Vec<ConfigError>,
}

impl ConnectionInfoBuilder<EnvSource> {
    /// A builder reading the process environment.
    pub fn from_env() -> Self {
        Self::new(EnvSource)
    }
}

impl<S: ConfigSource> ConnectionInfoBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            host: None,
            port: None,
            user: None,
            password: None,
            database_name: None,
            errors: Vec::new(),
        }
    }

    /// Resolve `PG_HOST` and `PG_PORT`. Both are checked even if the first fails.
    pub fn with_host_and_port(mut self) -> Self {
        tracing::debug!("resolving postgres host and port");
        match self.read(PG_HOST) {
            Some(host) => self.host = Some(host),
            None => self.errors.push(ConfigError::MissingHost),
        }
        match self.read(PG_PORT) {
            Some(port) => match port.parse::<u16>() {
                Ok(port) => self.port = Some(port),
                Err(e) => self.errors.push(ConfigError::PortParse(e)),
            },
            None => self.errors.push(ConfigError::MissingPort),
        }
        self
    }

    /// Resolve `PG_USER` and `PG_PASS`. Both are checked even if the first fails.
    pub fn with_user_and_password(mut self) -> Self {
        tracing::debug!("resolving postgres credentials");
        match self.read(PG_USER) {
            Some(user) => self.user = Some(user),
            None => self.errors.push(ConfigError::MissingUser),
        }
        match self.read(PG_PASS) {
            Some(pass) => self.password = Some(SecretString::from(pass)),
            None => self.errors.push(ConfigError::MissingPassword),
        }
        self
    }

    /// Resolve `PG_DBNAME`.
    pub fn with_database_name(mut self) -> Self {
        tracing::debug!("resolving postgres database name");
        match self.read(PG_DBNAME) {
            Some(name) => self.database_name = Some(name),
            None => self.errors.push(ConfigError::MissingDatabaseName),
        }
        self
    }

    /// Every error recorded so far, in discovery order.
    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    /// The settings, or the first recorded error. Later errors are dropped.
    ///
    /// A field whose stage was never run is reported as missing.
    pub fn build(self) -> Result<ConnectionInfo, ConfigError> {
        if let Some(first) = self.errors.into_iter().next() {
            return Err(first);
        }
        Ok(ConnectionInfo {
            host: self.host.ok_or(ConfigError::MissingHost)?,
            port: self.port.ok_or(ConfigError::MissingPort)?,
            user: self.user.ok_or(ConfigError::MissingUser)?,
            password: self.password.ok_or(ConfigError::MissingPassword)?,
            database_name: self
                .database_name
                .ok_or(ConfigError::MissingDatabaseName)?,
        })
    }

    /// Empty counts as unset.
    fn read(&self, key: &str) -> Option<String> {
        self.source.get(key).filter(|v| !v.is_empty())
    }
}
