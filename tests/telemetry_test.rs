//! Integration tests for telemetry initialization and span helpers.

use pg_repository::telemetry::connect::{self, ConnectOutcome};

#[test]
fn telemetry_initializes_without_endpoint() {
    // A global subscriber can only be set once per process, so this may
    // return Err if another test got there first; that is acceptable.
    let config = pg_repository::telemetry::TelemetryConfig {
        endpoint: None,
        service_name: "pgrepo-test".to_string(),
        log_level: "debug".to_string(),
    };
    let _guard = pg_repository::telemetry::init_telemetry(config);
}

#[test]
fn connect_span_records_target_and_outcome() {
    let span = connect::start_connect_span();
    connect::record_target(&span, "localhost", 5432, "d");
    connect::record_outcome(&span, ConnectOutcome::Live);
}

#[test]
fn outcome_labels() {
    assert_eq!(ConnectOutcome::Live.as_str(), "live");
    assert_eq!(ConnectOutcome::ConfigError.as_str(), "config_error");
    assert_eq!(ConnectOutcome::ConnectError.as_str(), "connect_error");
    assert_eq!(ConnectOutcome::PingError.to_string(), "ping_error");
}

#[test]
fn metric_instruments_work_without_a_provider() {
    use opentelemetry::KeyValue;
    let labels = [KeyValue::new("outcome", "live")];
    pg_repository::telemetry::metrics::connect_attempts().add(1, &labels);
    pg_repository::telemetry::metrics::connect_duration_ms().record(1.5, &labels);
}
