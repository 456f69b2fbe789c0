//! Connection provider
//!
//! Wraps a PostgreSQL pool. Each unit of work checks out one connection and
//! hands it back when the guard is dropped, on success and error paths alike.

use async_trait::async_trait;
use inv_core::config::DatabaseSettings;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;
use std::time::Duration;

use crate::error::{DbError, DbResult};

/// Hands out live database connections
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Open a connection for one unit of work. Released when dropped.
    async fn open(&self) -> DbResult<PoolConnection<Postgres>>;
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout for connections in seconds
    pub idle_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl DatabaseConfig {
    /// Create config with a specific URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn from_settings(settings: &DatabaseSettings) -> Self {
        Self {
            url: settings.url.clone(),
            max_connections: settings.pool_size,
            connect_timeout_secs: settings.connect_timeout_seconds,
            ..Default::default()
        }
    }

    fn options(&self) -> DbResult<PgPoolOptions> {
        if self.url.trim().is_empty() {
            return Err(DbError::Connection("connection string is empty".to_string()));
        }

        Ok(PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs)))
    }
}

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create the pool and establish the first connection
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let pool = config
            .options()?
            .connect(&config.url)
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;

        tracing::info!(
            "Database pool created with {} max connections",
            config.max_connections
        );

        Ok(Self { pool })
    }

    /// Create the pool without connecting; the first `open` does
    pub fn connect_lazy(config: &DatabaseConfig) -> DbResult<Self> {
        let pool = config
            .options()?
            .connect_lazy(&config.url)
            .map_err(|e| DbError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded schema migrations
    pub async fn run_migrations(&self) -> DbResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Database(e.into()))?;

        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Check if the database is reachable
    pub async fn ping(&self) -> DbResult<()> {
        let mut conn = self.open().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

#[async_trait]
impl ConnectionProvider for Database {
    async fn open(&self) -> DbResult<PoolConnection<Postgres>> {
        self.pool.acquire().await.map_err(|e| match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DbError::Connection(e.to_string())
            }
            other => DbError::Database(other),
        })
    }
}
