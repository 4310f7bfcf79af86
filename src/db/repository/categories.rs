//! Category repository. Categories are created and listed, never deleted.

use tracing::{info, warn};

use crate::db::models::CategoryRow;
use crate::db::{Database, StoreError};
use crate::models::validation;

/// List all categories
pub async fn get_categories(db: &Database) -> Result<Vec<CategoryRow>, StoreError> {
    let mut conn = db.acquire().await?;

    let rows = sqlx::query_as::<_, CategoryRow>(
        "SELECT category_id, category_name FROM categories ORDER BY category_name",
    )
    .fetch_all(&mut *conn)
    .await
    .inspect_err(|e| warn!("Error loading categories: {}", e))?;

    Ok(rows)
}

/// Create a category and return its ID. Names are unique.
pub async fn create_category(db: &Database, category_name: &str) -> Result<i64, StoreError> {
    let category_name = validation::required_text("category_name", category_name)?;

    let mut conn = db.acquire().await?;

    let result = sqlx::query("INSERT INTO categories (category_name) VALUES (?)")
        .bind(category_name)
        .execute(&mut *conn)
        .await
        .inspect_err(|e| warn!(category_name, "Error creating category: {}", e))?;

    let category_id = result.last_insert_rowid();
    info!(category_id, category_name, "Category created");

    Ok(category_id)
}
