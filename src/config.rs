use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub app_env: String,

    // SQLite
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub db_busy_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .unwrap_or(3001),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),

            // SQLite
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://shopping_list.db".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            db_acquire_timeout_secs: env::var("DB_ACQUIRE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            db_busy_timeout_secs: env::var("DB_BUSY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
        }
    }

    /// Configuration for an isolated in-memory database
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            port: 0,
            app_env: "test".to_string(),
            database_url: "sqlite::memory:".to_string(),
            // An in-memory database lives and dies with its connection
            db_max_connections: 1,
            db_acquire_timeout_secs: 5,
            db_busy_timeout_secs: 1,
        }
    }
}
