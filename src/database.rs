use crate::{config::DatabaseSettings, error::StartupError};
use async_trait::async_trait;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Connection,
};
use std::time::Duration;

/// A read-only liveness probe against a database. Handlers depend on this trait rather than on a
/// concrete pool so the health route can be exercised without a running database.
#[async_trait]
pub trait Ping: Send + Sync {
    /// Performs a round-trip to the database without touching any data.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// The shared database handle, a Postgres connection pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connects using the connection string stored in the environment variable named by
    /// `settings.url_variable`. The first connection is opened eagerly so that an unreachable
    /// database fails startup.
    #[tracing::instrument(name = "Connecting to database", skip(settings), fields(variable = %settings.url_variable))]
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StartupError> {
        let url = std::env::var(&settings.url_variable).map_err(|source| {
            StartupError::MissingDatabaseUrl { variable: settings.url_variable.clone(), source }
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .connect(&url)
            .await
            .map_err(|source| StartupError::Database {
                variable: settings.url_variable.clone(),
                acquire_timeout_secs: settings.acquire_timeout_secs,
                source,
            })?;
        tracing::info!("Database connection established");

        Ok(Self::from_pool(pool))
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Closes every connection in the pool. Waits for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection released");
    }
}

#[async_trait]
impl Ping for Database {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        let mut connection = self.pool.acquire().await?;
        connection.ping().await
    }
}
