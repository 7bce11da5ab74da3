//! Error types for pg-repository.

use std::num::ParseIntError;
use thiserror::Error;

/// A connection setting that is absent or unusable.
///
/// Fixing one of these means fixing the environment and starting over;
/// nothing in this crate retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no postgres host config")]
    MissingHost,

    #[error("no postgres host port config")]
    MissingPort,

    #[error("invalid postgres port: {0}")]
    PortParse(#[from] ParseIntError),

    #[error("no postgres username")]
    MissingUser,

    #[error("no postgres password")]
    MissingPassword,

    #[error("no postgres db name config")]
    MissingDatabaseName,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Connect or ping failure, straight from the driver.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Reserved for repositories built on top of the connection handle.
    #[error("not found")]
    NotFoundAggregateId,

    /// Reserved for repositories built on top of the connection handle.
    #[error("no event was appended")]
    NoEventAppended,

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// The configuration error, if this failure happened before any connect attempt.
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Error::Config(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
