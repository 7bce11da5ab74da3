use pg_repository::config::connection::{PG_DBNAME, PG_HOST, PG_PASS, PG_PORT, PG_USER};
use pg_repository::config::{ExposeSecret, MapSource};
use pg_repository::error::{ConfigError, Error};
use pg_repository::{RepositoryFactory, new_repository};

fn source(host: &str, port: &str) -> MapSource {
    MapSource::new()
        .with(PG_HOST, host)
        .with(PG_PORT, port)
        .with(PG_USER, "u")
        .with(PG_PASS, "p")
        .with(PG_DBNAME, "d")
}

/// Helper: factory for a local dev server.
/// Reads PG_* from the environment when PG_HOST is set.
fn live_factory() -> RepositoryFactory<MapSource> {
    let var = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.to_string());
    RepositoryFactory::new(
        MapSource::new()
            .with(PG_HOST, var(PG_HOST, "localhost"))
            .with(PG_PORT, var(PG_PORT, "5432"))
            .with(PG_USER, var(PG_USER, "postgres"))
            .with(PG_PASS, var(PG_PASS, "postgres"))
            .with(PG_DBNAME, var(PG_DBNAME, "postgres")),
    )
}

#[test]
fn connection_string_is_exact() {
    let factory = RepositoryFactory::new(source("localhost", "5432"));
    let dsn = factory.connection_string().unwrap();
    assert_eq!(
        dsn.expose_secret(),
        "host=localhost port=5432 user=u password=p dbname=d sslmode=disable"
    );
}

#[test]
fn connection_string_is_stable_across_invocations() {
    let factory = RepositoryFactory::new(source("db.example.com", "6432"));
    let first = factory.connection_string().unwrap();
    let second = factory.connection_string().unwrap();
    assert_eq!(first.expose_secret(), second.expose_secret());
}

#[test]
fn redacted_connection_string_masks_only_the_password() {
    let info = RepositoryFactory::new(source("localhost", "5432"))
        .connection_info()
        .unwrap();
    assert_eq!(
        info.redacted_connection_string(),
        "host=localhost port=5432 user=u password=******** dbname=d sslmode=disable"
    );
}

#[tokio::test]
async fn config_error_is_returned_before_any_connect() {
    let mut settings = source("localhost", "5432");
    settings.remove(PG_HOST);
    settings.remove(PG_PORT);

    let err = RepositoryFactory::new(settings).connect().await.unwrap_err();
    assert_eq!(err.as_config(), Some(&ConfigError::MissingHost));
}

#[tokio::test]
async fn bad_port_is_a_config_error() {
    let err = RepositoryFactory::new(source("localhost", "abc"))
        .connect()
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::Config(ConfigError::PortParse(_))),
        "got {err:?}"
    );
}

#[tokio::test]
async fn unreachable_server_is_a_database_error() {
    // Nothing listens on port 1; the connect is refused straight away.
    let err = RepositoryFactory::new(source("127.0.0.1", "1"))
        .connect()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Database(_)), "got {err:?}");
    assert!(err.as_config().is_none());
}

#[tokio::test]
async fn new_repository_reads_the_environment() {
    unsafe {
        for key in [PG_HOST, PG_PORT, PG_USER, PG_PASS, PG_DBNAME] {
            std::env::remove_var(key);
        }
    }
    let err = new_repository().await.unwrap_err();
    assert_eq!(err.as_config(), Some(&ConfigError::MissingHost));
}

#[tokio::test]
#[ignore] // Requires running Postgres
async fn connects_and_pings() {
    let mut repository = live_factory().connect().await.unwrap();

    let row: (i32,) = sqlx::query_as("SELECT 1")
        .fetch_one(repository.connection_mut())
        .await
        .unwrap();
    assert_eq!(row.0, 1);

    repository.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running Postgres
async fn wrong_password_is_a_database_error() {
    let factory = live_factory();
    let info = factory.connection_info().unwrap();
    let wrong = RepositoryFactory::new(
        MapSource::new()
            .with(PG_HOST, info.host())
            .with(PG_PORT, info.port().to_string())
            .with(PG_USER, info.user())
            .with(PG_PASS, "definitely-not-the-password")
            .with(PG_DBNAME, info.database_name()),
    );

    let err = wrong.connect().await.unwrap_err();
    assert!(matches!(err, Error::Database(_)), "got {err:?}");
}
