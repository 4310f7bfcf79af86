//! Store error taxonomy
//!
//! Every failure inside the repository is converted to a `StoreError`
//! before it leaves `crate::db`.

use thiserror::Error;

use crate::models::ValidationError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Store unreachable, pool exhausted or closed
    #[error("database unavailable: {0}")]
    ConnectionUnavailable(#[source] sqlx::Error),

    /// Constraint violation, bad parameter or duplicate key
    #[error("statement failed: {0}")]
    Statement(#[source] sqlx::Error),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionUnavailable(_) => "connection_unavailable",
            Self::Statement(_) => "statement",
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => Self::ConnectionUnavailable(e),
            sqlx::Error::Database(ref db) if is_contention(db.code().as_deref()) => {
                Self::ConnectionUnavailable(e)
            }
            other => Self::Statement(other),
        }
    }
}

/// SQLITE_BUSY (5) or SQLITE_LOCKED (6), including their extended codes
fn is_contention(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .is_some_and(|c| matches!(c & 0xff, 5 | 6))
}
