//! Database module
//!
//! SQLite integration using sqlx with:
//! - Connection provider handing out one connection per operation
//! - Row types with FromRow
//! - Repository pattern for data access
//! - Transactional cascade delete for users

pub mod error;
pub mod models;
pub mod pool;
pub mod repository;

// Re-export commonly used items
pub use error::StoreError;
pub use models::{CascadeSummary, CategoryRow, ItemView, ListItemView, ShoppingListRow, UserRow};
pub use pool::{create_pool, health_check, run_migrations, Database};

/// Fresh in-memory database with the schema applied
#[cfg(test)]
pub async fn test_database() -> Database {
    let config = crate::config::Config::in_memory();
    let pool = create_pool(&config).await.unwrap();
    run_migrations(&pool).await.unwrap();
    Database::new(pool)
}

/// File-backed database for tests that need several connections
#[cfg(test)]
pub async fn file_database(
    path: &std::path::Path,
    max_connections: u32,
    busy_timeout_secs: u64,
) -> Database {
    let config = crate::config::Config {
        database_url: format!("sqlite://{}", path.display()),
        db_max_connections: max_connections,
        db_busy_timeout_secs: busy_timeout_secs,
        ..crate::config::Config::in_memory()
    };
    let pool = create_pool(&config).await.unwrap();
    run_migrations(&pool).await.unwrap();
    Database::new(pool)
}
