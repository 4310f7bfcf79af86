//! Catalog item repository

use tracing::{info, warn};

use crate::db::models::ItemView;
use crate::db::{Database, StoreError};
use crate::models::validation;

/// List all items with their category names
pub async fn get_items(db: &Database) -> Result<Vec<ItemView>, StoreError> {
    let mut conn = db.acquire().await?;

    let rows = sqlx::query_as::<_, ItemView>(
        r#"
        SELECT i.item_id, i.item_name, i.unit, c.category_name
        FROM items i
        JOIN categories c ON i.category_id = c.category_id
        ORDER BY i.item_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await
    .inspect_err(|e| warn!("Error loading items: {}", e))?;

    Ok(rows)
}

/// Create an item under an existing category and return its ID
pub async fn create_item(
    db: &Database,
    item_name: &str,
    category_id: i64,
    unit: &str,
) -> Result<i64, StoreError> {
    let item_name = validation::required_text("item_name", item_name)?;
    let unit = validation::required_text("unit", unit)?;

    let mut conn = db.acquire().await?;

    let result = sqlx::query("INSERT INTO items (item_name, category_id, unit) VALUES (?, ?, ?)")
        .bind(item_name)
        .bind(category_id)
        .bind(unit)
        .execute(&mut *conn)
        .await
        .inspect_err(|e| warn!(item_name, category_id, "Error creating item: {}", e))?;

    let item_id = result.last_insert_rowid();
    info!(item_id, item_name, category_id, "Item created");

    Ok(item_id)
}
