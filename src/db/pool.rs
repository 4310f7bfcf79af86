//! Database connection provider

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Transaction;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::db::error::StoreError;
use crate::metrics;

/// Create a SQLite connection pool
pub async fn create_pool(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    info!("Opening SQLite database {}", config.database_url);

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.db_busy_timeout_secs));

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs));

    // An in-memory database is dropped with its last connection
    if config.database_url.contains(":memory:") {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        pool_options = pool_options.idle_timeout(Duration::from_secs(600));
    }

    let pool = pool_options.connect_with(options).await?;

    info!(
        "SQLite connection pool created with max {} connections",
        config.db_max_connections
    );

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed");

    Ok(())
}

/// Health check for the database
pub async fn health_check(db: &Database) -> bool {
    match sqlx::query("SELECT 1").fetch_one(db.pool()).await {
        Ok(_) => true,
        Err(e) => {
            error!("Database health check failed: {}", e);
            false
        }
    }
}

/// Hands out one connection per repository operation.
///
/// Connections go back to the pool when the returned guard is dropped,
/// on success and on error alike.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a connection for a single operation
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        match self.pool.acquire().await {
            Ok(conn) => {
                debug!("Acquired database connection");
                metrics::record_connection(true);
                Ok(conn)
            }
            Err(e) => {
                error!("Database connection failed: {}", e);
                metrics::record_connection(false);
                Err(StoreError::ConnectionUnavailable(e))
            }
        }
    }

    /// Acquire a connection and open a write transaction on it.
    ///
    /// `BEGIN IMMEDIATE` takes the write lock up front, waiting on the busy
    /// timeout, so a transaction that reads before it writes never has to
    /// upgrade its lock mid-way. Dropping the transaction without `commit`
    /// rolls it back.
    pub async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, StoreError> {
        match self.pool.begin_with("BEGIN IMMEDIATE").await {
            Ok(tx) => {
                debug!("Opened write transaction");
                metrics::record_connection(true);
                Ok(tx)
            }
            Err(e) => {
                let err = StoreError::from(e);
                error!("Database transaction could not be opened: {}", err);
                metrics::record_connection(false);
                Err(err)
            }
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
