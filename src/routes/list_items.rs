//! List item API endpoints

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::db::repository::list_items;
use crate::models::{Ack, PurchasedUpdate, QuantityUpdate};
use crate::routes::error::{reject, ApiError};
use crate::AppState;

/// PUT /list_items/{list_item_id}/quantity/
pub async fn update_quantity(
    State(state): State<Arc<AppState>>,
    Path(list_item_id): Path<i64>,
    Json(payload): Json<QuantityUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    list_items::update_list_item_quantity(&state.db, list_item_id, payload.new_quantity)
        .await
        .map_err(reject("Failed to update quantity."))?;

    Ok(Json(Ack::ok("Quantity updated.")))
}

/// PUT /list_items/{list_item_id}/purchased/
pub async fn mark_purchased(
    State(state): State<Arc<AppState>>,
    Path(list_item_id): Path<i64>,
    Json(payload): Json<PurchasedUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    list_items::mark_list_item_purchased(&state.db, list_item_id, payload.is_purchased)
        .await
        .map_err(reject("Failed to update status."))?;

    Ok(Json(Ack::ok("Purchased status updated.")))
}

/// DELETE /list_items/{list_item_id}/
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(list_item_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    list_items::delete_list_item(&state.db, list_item_id)
        .await
        .map_err(reject("Failed to delete item."))?;

    Ok(Json(Ack::ok("Item deleted from list.")))
}
