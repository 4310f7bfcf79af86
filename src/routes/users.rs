//! User API endpoints

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::db::repository::users;
use crate::models::{Ack, UserCreate};
use crate::routes::error::{reject, ApiError};
use crate::AppState;

/// GET /users/ - List all users
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let rows = users::get_users(&state.db)
        .await
        .map_err(reject("Failed to load users."))?;

    Ok(Json(rows))
}

/// POST /users/ - Create a user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = users::create_user(&state.db, &payload.username, &payload.email)
        .await
        .map_err(reject("Username already exists or error occurred."))?;

    Ok(Json(Ack::created("User created successfully.", user_id)))
}
