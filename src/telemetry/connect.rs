//! Span helpers for repository construction.
//!
//! Field names follow the OTel database conventions where one exists
//! (`db.system.name`, `server.address`, `server.port`, `db.namespace`).

use tracing::Span;

/// How a construction attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    Live,
    ConfigError,
    ConnectError,
    PingError,
}

impl ConnectOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectOutcome::Live => "live",
            ConnectOutcome::ConfigError => "config_error",
            ConnectOutcome::ConnectError => "connect_error",
            ConnectOutcome::PingError => "ping_error",
        }
    }
}

impl std::fmt::Display for ConnectOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start a span covering one repository construction.
///
/// Server fields are empty until configuration resolves; fill them with
/// [`record_target`].
pub fn start_connect_span() -> Span {
    tracing::info_span!(
        "pg.connect",
        "db.system.name" = "postgresql",
        "server.address" = tracing::field::Empty,
        "server.port" = tracing::field::Empty,
        "db.namespace" = tracing::field::Empty,
        "connect.outcome" = tracing::field::Empty,
    )
}

/// Record the resolved server on the span. Never takes credentials.
pub fn record_target(span: &Span, host: &str, port: u16, database: &str) {
    span.record("server.address", host);
    span.record("server.port", port);
    span.record("db.namespace", database);
}

/// Record how the attempt ended.
pub fn record_outcome(span: &Span, outcome: ConnectOutcome) {
    span.record("connect.outcome", outcome.as_str());
}
