//! Metric instruments for connection setup.
//!
//! Created from the `"pg-repository"` meter on the globally registered
//! `MeterProvider`; a no-op provider when telemetry is not initialized.

use opentelemetry::metrics::{Counter, Histogram, Meter};

fn meter() -> Meter {
    opentelemetry::global::meter("pg-repository")
}

/// Counter: repository construction attempts.
/// Labels: `outcome` ("live" | "config_error" | "connect_error" | "ping_error").
pub fn connect_attempts() -> Counter<u64> {
    meter()
        .u64_counter("pg_repository.connect.attempts")
        .with_description("Number of repository construction attempts")
        .build()
}

/// Histogram: time from connect start to a pinged handle, or to failure.
/// Labels: `outcome`.
pub fn connect_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("pg_repository.connect.duration_ms")
        .with_description("Connection setup duration in milliseconds")
        .with_unit("ms")
        .build()
}
