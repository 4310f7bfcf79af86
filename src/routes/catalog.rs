//! Category and item API endpoints

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::db::repository::{categories, items};
use crate::models::{Ack, CategoryCreate, ItemCreate};
use crate::routes::error::{reject, ApiError};
use crate::AppState;

/// GET /categories/
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = categories::get_categories(&state.db)
        .await
        .map_err(reject("Failed to load categories."))?;

    Ok(Json(rows))
}

/// POST /categories/
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CategoryCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let category_id = categories::create_category(&state.db, &payload.category_name)
        .await
        .map_err(reject("Category already exists or error occurred."))?;

    Ok(Json(Ack::created("Category created successfully.", category_id)))
}

/// GET /items/ - Items with their category names
pub async fn list_items(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let rows = items::get_items(&state.db)
        .await
        .map_err(reject("Failed to load items."))?;

    Ok(Json(rows))
}

/// POST /items/
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ItemCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = items::create_item(
        &state.db,
        &payload.item_name,
        payload.category_id,
        &payload.unit,
    )
    .await
    .map_err(reject("Error creating item."))?;

    Ok(Json(Ack::created("Item created successfully.", item_id)))
}
