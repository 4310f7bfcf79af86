//! List item repository for database operations
//!
//! A list item ties a catalog item to a shopping list with a quantity
//! and a purchased flag.

use tracing::{info, warn};

use crate::db::models::ListItemView;
use crate::db::{Database, StoreError};
use crate::models::validation;

/// Items on a list, with item name, unit and category name
pub async fn get_list_items(db: &Database, list_id: i64) -> Result<Vec<ListItemView>, StoreError> {
    let mut conn = db.acquire().await?;

    let rows = sqlx::query_as::<_, ListItemView>(
        r#"
        SELECT li.list_item_id, li.item_id, i.item_name, c.category_name, i.unit,
               li.quantity, li.is_purchased
        FROM list_items li
        JOIN items i ON li.item_id = i.item_id
        JOIN categories c ON i.category_id = c.category_id
        WHERE li.list_id = ?
        ORDER BY li.list_item_id
        "#,
    )
    .bind(list_id)
    .fetch_all(&mut *conn)
    .await
    .inspect_err(|e| warn!(list_id, "Error loading list items: {}", e))?;

    Ok(rows)
}

/// Put an item on a list and return the new list item ID
pub async fn add_item_to_list(
    db: &Database,
    list_id: i64,
    item_id: i64,
    quantity: f64,
) -> Result<i64, StoreError> {
    let quantity = validation::quantity(quantity)?;

    let mut conn = db.acquire().await?;

    let result = sqlx::query("INSERT INTO list_items (list_id, item_id, quantity) VALUES (?, ?, ?)")
        .bind(list_id)
        .bind(item_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await
        .inspect_err(|e| warn!(list_id, item_id, "Error adding item to list: {}", e))?;

    let list_item_id = result.last_insert_rowid();
    info!(list_item_id, list_id, item_id, quantity, "Item added to list");

    Ok(list_item_id)
}

pub async fn update_list_item_quantity(
    db: &Database,
    list_item_id: i64,
    new_quantity: f64,
) -> Result<(), StoreError> {
    let new_quantity = validation::quantity(new_quantity)?;

    let mut conn = db.acquire().await?;

    let updated = sqlx::query("UPDATE list_items SET quantity = ? WHERE list_item_id = ?")
        .bind(new_quantity)
        .bind(list_item_id)
        .execute(&mut *conn)
        .await
        .inspect_err(|e| warn!(list_item_id, "Error updating quantity: {}", e))?
        .rows_affected();

    if updated == 0 {
        return Err(StoreError::not_found("list item", list_item_id));
    }

    info!(list_item_id, new_quantity, "Quantity updated");
    Ok(())
}

pub async fn mark_list_item_purchased(
    db: &Database,
    list_item_id: i64,
    is_purchased: bool,
) -> Result<(), StoreError> {
    let mut conn = db.acquire().await?;

    let updated = sqlx::query("UPDATE list_items SET is_purchased = ? WHERE list_item_id = ?")
        .bind(is_purchased)
        .bind(list_item_id)
        .execute(&mut *conn)
        .await
        .inspect_err(|e| warn!(list_item_id, "Error updating purchase status: {}", e))?
        .rows_affected();

    if updated == 0 {
        return Err(StoreError::not_found("list item", list_item_id));
    }

    info!(list_item_id, is_purchased, "Purchased status updated");
    Ok(())
}

/// Remove an item from its list. `NotFound` when the ID matches nothing.
pub async fn delete_list_item(db: &Database, list_item_id: i64) -> Result<(), StoreError> {
    let mut conn = db.acquire().await?;

    let deleted = sqlx::query("DELETE FROM list_items WHERE list_item_id = ?")
        .bind(list_item_id)
        .execute(&mut *conn)
        .await
        .inspect_err(|e| warn!(list_item_id, "Error deleting item: {}", e))?
        .rows_affected();

    if deleted == 0 {
        return Err(StoreError::not_found("list item", list_item_id));
    }

    info!(list_item_id, "Item removed from list");
    Ok(())
}

/// Shopping list that owns a list item
pub async fn find_list_id(db: &Database, list_item_id: i64) -> Result<i64, StoreError> {
    let mut conn = db.acquire().await?;

    let list_id: Option<i64> =
        sqlx::query_scalar("SELECT list_id FROM list_items WHERE list_item_id = ?")
            .bind(list_item_id)
            .fetch_optional(&mut *conn)
            .await
            .inspect_err(|e| warn!(list_item_id, "Error resolving list of item: {}", e))?;

    list_id.ok_or_else(|| StoreError::not_found("list item", list_item_id))
}
