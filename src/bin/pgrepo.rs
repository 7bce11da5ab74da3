//! pgrepo CLI: check Postgres connection settings from the environment.

use clap::{Parser, Subcommand};
use pg_repository::RepositoryFactory;
use pg_repository::config::TelemetrySettings;
use pg_repository::telemetry::{TelemetryConfig, init_telemetry};

#[derive(Parser)]
#[command(name = "pgrepo", about = "Validate and probe Postgres connection settings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate PG_* settings and print the connection string (password masked)
    Check,
    /// Connect with the PG_* settings and ping the server
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = TelemetrySettings::from_env();
    let _guard = init_telemetry(TelemetryConfig {
        endpoint: settings.otel_endpoint,
        service_name: "pgrepo".to_string(),
        log_level: settings.log_level,
    })?;

    let factory = RepositoryFactory::from_env();

    match cli.command {
        Command::Check => {
            let info = factory.connection_info()?;
            println!("{}", info.redacted_connection_string());
        }
        Command::Ping => {
            let repository = factory.connect().await?;
            println!("live");
            repository.close().await?;
        }
    }

    Ok(())
}
