//! Shopping list repository for database operations

use chrono::Local;
use tracing::{info, warn};

use crate::db::models::ShoppingListRow;
use crate::db::{Database, StoreError};
use crate::models::validation;

/// Shopping lists owned by a user, oldest first
pub async fn get_user_shopping_lists(
    db: &Database,
    user_id: i64,
) -> Result<Vec<ShoppingListRow>, StoreError> {
    let mut conn = db.acquire().await?;

    let rows = sqlx::query_as::<_, ShoppingListRow>(
        r#"
        SELECT list_id, user_id, list_name, created_date
        FROM shopping_lists
        WHERE user_id = ?
        ORDER BY list_id
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
    .inspect_err(|e| warn!(user_id, "Error loading shopping lists: {}", e))?;

    Ok(rows)
}

/// Every shopping list, across all users
pub async fn get_all_shopping_lists(db: &Database) -> Result<Vec<ShoppingListRow>, StoreError> {
    let mut conn = db.acquire().await?;

    let rows = sqlx::query_as::<_, ShoppingListRow>(
        "SELECT list_id, user_id, list_name, created_date FROM shopping_lists ORDER BY list_id",
    )
    .fetch_all(&mut *conn)
    .await
    .inspect_err(|e| warn!("Error loading shopping lists: {}", e))?;

    Ok(rows)
}

/// Find shopping list by ID
pub async fn find_shopping_list(
    db: &Database,
    list_id: i64,
) -> Result<Option<ShoppingListRow>, StoreError> {
    let mut conn = db.acquire().await?;

    let row = sqlx::query_as::<_, ShoppingListRow>(
        "SELECT list_id, user_id, list_name, created_date FROM shopping_lists WHERE list_id = ?",
    )
    .bind(list_id)
    .fetch_optional(&mut *conn)
    .await
    .inspect_err(|e| warn!(list_id, "Error loading shopping list: {}", e))?;

    Ok(row)
}

/// Create a list for a user, dated today, and return its ID
pub async fn create_shopping_list(
    db: &Database,
    user_id: i64,
    list_name: &str,
) -> Result<i64, StoreError> {
    let list_name = validation::required_text("list_name", list_name)?;
    let created_date = Local::now().date_naive();

    let mut conn = db.acquire().await?;

    let result = sqlx::query(
        "INSERT INTO shopping_lists (user_id, list_name, created_date) VALUES (?, ?, ?)",
    )
    .bind(user_id)
    .bind(list_name)
    .bind(created_date)
    .execute(&mut *conn)
    .await
    .inspect_err(|e| warn!(user_id, list_name, "Error creating shopping list: {}", e))?;

    let list_id = result.last_insert_rowid();
    info!(list_id, user_id, "Shopping list created");

    Ok(list_id)
}

/// Delete a list and the items on it.
///
/// Returns `NotFound` when no list has this ID.
pub async fn delete_shopping_list(db: &Database, list_id: i64) -> Result<(), StoreError> {
    let mut tx = db.begin_write().await?;

    let items_deleted = sqlx::query("DELETE FROM list_items WHERE list_id = ?")
        .bind(list_id)
        .execute(&mut *tx)
        .await
        .inspect_err(|e| warn!(list_id, "Delete list error: {}", e))?
        .rows_affected();

    let lists_deleted = sqlx::query("DELETE FROM shopping_lists WHERE list_id = ?")
        .bind(list_id)
        .execute(&mut *tx)
        .await
        .inspect_err(|e| warn!(list_id, "Delete list error: {}", e))?
        .rows_affected();

    if lists_deleted == 0 {
        return Err(StoreError::not_found("shopping list", list_id));
    }

    tx.commit().await?;
    info!(list_id, items_deleted, "Shopping list deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{categories, items, list_items, users};
    use crate::db::test_database;

    #[tokio::test]
    async fn test_create_list_defaults_to_today() {
        let db = test_database().await;
        let user_id = users::create_user(&db, "amy", "a@x.com").await.unwrap();
        let list_id = create_shopping_list(&db, user_id, "Groceries").await.unwrap();

        let lists = get_user_shopping_lists(&db, user_id).await.unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].list_id, list_id);
        assert_eq!(lists[0].list_name, "Groceries");
        assert_eq!(lists[0].created_date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_list_for_unknown_user_rejected() {
        let db = test_database().await;

        let err = create_shopping_list(&db, 7, "Groceries").await.unwrap_err();
        assert!(matches!(err, StoreError::Statement(_)));
    }

    #[tokio::test]
    async fn test_lists_are_scoped_to_user() {
        let db = test_database().await;
        let amy = users::create_user(&db, "amy", "a@x.com").await.unwrap();
        let bob = users::create_user(&db, "bob", "b@x.com").await.unwrap();
        create_shopping_list(&db, amy, "Groceries").await.unwrap();
        create_shopping_list(&db, bob, "Hardware").await.unwrap();

        let amy_lists = get_user_shopping_lists(&db, amy).await.unwrap();
        assert_eq!(amy_lists.len(), 1);
        assert_eq!(amy_lists[0].user_id, amy);
        assert_eq!(get_all_shopping_lists(&db).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_list_removes_its_items() {
        let db = test_database().await;
        let user_id = users::create_user(&db, "amy", "a@x.com").await.unwrap();
        let dairy = categories::create_category(&db, "Dairy").await.unwrap();
        let milk = items::create_item(&db, "Milk", dairy, "L").await.unwrap();
        let list_id = create_shopping_list(&db, user_id, "Groceries").await.unwrap();
        list_items::add_item_to_list(&db, list_id, milk, 1.0).await.unwrap();

        delete_shopping_list(&db, list_id).await.unwrap();

        assert!(find_shopping_list(&db, list_id).await.unwrap().is_none());
        assert!(list_items::get_list_items(&db, list_id).await.unwrap().is_empty());
        assert!(users::find_user(&db, user_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_unknown_list_is_not_found() {
        let db = test_database().await;

        let err = delete_shopping_list(&db, 3).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 3, .. }));
    }
}
