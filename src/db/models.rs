//! Database row types for SQLite
//!
//! Rows are serialized as-is by the JSON API and handed to the HTML
//! templates, so field names match the column names.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// User row from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

/// Category row from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CategoryRow {
    pub category_id: i64,
    pub category_name: String,
}

/// Catalog item joined with its category name
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ItemView {
    pub item_id: i64,
    pub item_name: String,
    pub unit: String,
    pub category_name: String,
}

/// Shopping list row from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ShoppingListRow {
    pub list_id: i64,
    pub user_id: i64,
    pub list_name: String,
    pub created_date: NaiveDate,
}

/// List item joined with item, unit and category names
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ListItemView {
    pub list_item_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub category_name: String,
    pub unit: String,
    pub quantity: f64,
    pub is_purchased: bool,
}

/// Rows removed by a user cascade delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeSummary {
    pub shopping_lists: u64,
    pub list_items: u64,
}
