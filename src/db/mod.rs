//! The live Postgres handle and the factory that produces it.
//!
//! Queries, transactions and migrations belong to whoever takes the
//! handle; this module stops once the connection has answered a ping.

pub mod factory;

pub use factory::RepositoryFactory;

use crate::error::Result;
use sqlx::{Connection, PgConnection};

/// Wraps one live, pinged connection. The caller owns it from here on.
#[derive(Debug)]
pub struct Repository {
    connection: PgConnection,
}

impl Repository {
    pub(crate) fn new(connection: PgConnection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &PgConnection {
        &self.connection
    }

    /// Mutable access, which is what sqlx executors need.
    pub fn connection_mut(&mut self) -> &mut PgConnection {
        &mut self.connection
    }

    pub fn into_connection(self) -> PgConnection {
        self.connection
    }

    /// Terminate the session cleanly instead of just dropping the socket.
    pub async fn close(self) -> Result<()> {
        self.connection.close().await?;
        Ok(())
    }
}

/// Build a [`Repository`] from `PG_HOST`, `PG_PORT`, `PG_USER`, `PG_PASS`
/// and `PG_DBNAME` in the process environment.
pub async fn new_repository() -> Result<Repository> {
    RepositoryFactory::from_env().connect().await
}
