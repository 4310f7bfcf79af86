//! User repository for database operations
//!
//! Deleting a user is the only multi-statement write: the user's list
//! items go first, then its shopping lists, then the user row, all on
//! one connection inside one transaction.

use sqlx::{Sqlite, Transaction};
use tracing::{error, info, instrument, warn};

use crate::db::models::{CascadeSummary, UserRow};
use crate::db::{Database, StoreError};
use crate::metrics;
use crate::models::validation;

/// List all users
pub async fn get_users(db: &Database) -> Result<Vec<UserRow>, StoreError> {
    let mut conn = db.acquire().await?;

    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT user_id, username, email FROM users ORDER BY user_id",
    )
    .fetch_all(&mut *conn)
    .await
    .inspect_err(|e| warn!("Error loading users: {}", e))?;

    Ok(rows)
}

/// Find user by ID
pub async fn find_user(db: &Database, user_id: i64) -> Result<Option<UserRow>, StoreError> {
    let mut conn = db.acquire().await?;

    let row = sqlx::query_as::<_, UserRow>(
        "SELECT user_id, username, email FROM users WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await
    .inspect_err(|e| warn!(user_id, "Error loading user: {}", e))?;

    Ok(row)
}

/// Create a user and return its ID. Usernames are unique.
#[instrument(skip(db, email))]
pub async fn create_user(db: &Database, username: &str, email: &str) -> Result<i64, StoreError> {
    let username = validation::required_text("username", username)?;
    let email = validation::email(email)?;

    let mut conn = db.acquire().await?;

    let result = sqlx::query("INSERT INTO users (username, email) VALUES (?, ?)")
        .bind(username)
        .bind(email)
        .execute(&mut *conn)
        .await
        .inspect_err(|e| warn!("Error creating user: {}", e))?;

    let user_id = result.last_insert_rowid();
    info!(user_id, "User created");

    Ok(user_id)
}

/// Delete a user together with its shopping lists and their items.
///
/// Nothing is removed unless every step succeeds.
#[instrument(skip(db))]
pub async fn delete_user(db: &Database, user_id: i64) -> Result<CascadeSummary, StoreError> {
    let tx = db.begin_write().await?;

    match cascade_delete(tx, user_id).await {
        Ok(summary) => {
            metrics::record_cascade(true);
            info!(
                user_id,
                shopping_lists = summary.shopping_lists,
                list_items = summary.list_items,
                "User deleted"
            );
            Ok(summary)
        }
        Err(StoreError::NotFound { resource, id }) => {
            metrics::record_cascade(false);
            warn!(user_id, "Delete requested for unknown user");
            Err(StoreError::NotFound { resource, id })
        }
        Err(e) => {
            metrics::record_cascade(false);
            error!(user_id, "Error deleting user, rolled back: {}", e);
            Err(e)
        }
    }
}

async fn cascade_delete(
    mut tx: Transaction<'static, Sqlite>,
    user_id: i64,
) -> Result<CascadeSummary, StoreError> {
    let list_ids: Vec<i64> =
        sqlx::query_scalar("SELECT list_id FROM shopping_lists WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&mut *tx)
            .await?;

    let mut summary = CascadeSummary::default();

    for list_id in &list_ids {
        let result = sqlx::query("DELETE FROM list_items WHERE list_id = ?")
            .bind(list_id)
            .execute(&mut *tx)
            .await?;
        summary.list_items += result.rows_affected();
    }

    summary.shopping_lists = sqlx::query("DELETE FROM shopping_lists WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let users_deleted = sqlx::query("DELETE FROM users WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if users_deleted == 0 {
        // tx is dropped here, rolling back
        return Err(StoreError::not_found("user", user_id));
    }

    tx.commit().await?;

    Ok(summary)
}
