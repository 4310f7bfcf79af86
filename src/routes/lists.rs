//! Shopping list API endpoints

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::db::repository::{list_items, shopping_lists};
use crate::models::{Ack, ListItemAdd, ShoppingListCreate};
use crate::routes::error::{reject, ApiError};
use crate::AppState;

/// GET /lists/ - Every shopping list
pub async fn list_all(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let rows = shopping_lists::get_all_shopping_lists(&state.db)
        .await
        .map_err(reject("Failed to load shopping lists."))?;

    Ok(Json(rows))
}

/// POST /lists/
pub async fn create_list(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ShoppingListCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let list_id =
        shopping_lists::create_shopping_list(&state.db, payload.user_id, &payload.list_name)
            .await
            .map_err(reject("Error creating shopping list."))?;

    Ok(Json(Ack::created("Shopping list created successfully.", list_id)))
}

/// GET /users/{user_id}/lists/
pub async fn user_lists(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = shopping_lists::get_user_shopping_lists(&state.db, user_id)
        .await
        .map_err(reject("Failed to load shopping lists."))?;

    Ok(Json(rows))
}

/// GET /lists/{list_id}
pub async fn get_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let list = shopping_lists::find_shopping_list(&state.db, list_id)
        .await
        .map_err(reject("Failed to load shopping list."))?
        .ok_or_else(|| ApiError::not_found("List not found."))?;

    Ok(Json(list))
}

/// DELETE /lists/{list_id} - Delete a list and its items
pub async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    shopping_lists::delete_shopping_list(&state.db, list_id)
        .await
        .map_err(reject("Error deleting list."))?;

    Ok(Json(Ack::ok("Shopping list deleted successfully.")))
}

/// GET /lists/{list_id}/items/
pub async fn list_items_in_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = list_items::get_list_items(&state.db, list_id)
        .await
        .map_err(reject("Failed to load list items."))?;

    Ok(Json(rows))
}

/// POST /lists/{list_id}/items/
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
    Json(payload): Json<ListItemAdd>,
) -> Result<impl IntoResponse, ApiError> {
    let list_item_id =
        list_items::add_item_to_list(&state.db, list_id, payload.item_id, payload.quantity)
            .await
            .map_err(reject("Failed to add item."))?;

    Ok(Json(Ack::created("Item added to list.", list_item_id)))
}
