//! HTML pages and form handlers
//!
//! Form posts redirect with `303 See Other` on success so a browser
//! refresh never resubmits.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    Form,
};
use std::sync::Arc;
use tracing::instrument;

use crate::db::repository::{categories, items, list_items, shopping_lists, users};
use crate::db::{CategoryRow, ItemView, ListItemView, ShoppingListRow, UserRow};
use crate::models::{ItemCreate, ListItemAdd, PurchasedForm, ShoppingListForm, UserCreate};
use crate::routes::error::{reject, ApiError};
use crate::AppState;

/// Users page with the add-user form
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub users: Vec<UserRow>,
}

/// One user's shopping lists
#[derive(Template, WebTemplate)]
#[template(path = "user_lists.html")]
pub struct UserListsTemplate {
    pub user: UserRow,
    pub shopping_lists: Vec<ShoppingListRow>,
}

/// A shopping list with its owner and items
#[derive(Template, WebTemplate)]
#[template(path = "shopping_list_detail.html")]
pub struct ListDetailTemplate {
    pub shopping_list: ShoppingListRow,
    pub user: UserRow,
    pub items: Vec<ListItemView>,
}

#[derive(Template, WebTemplate)]
#[template(path = "add_item.html")]
pub struct AddItemTemplate {
    pub shopping_list: ShoppingListRow,
    pub items: Vec<ItemView>,
}

#[derive(Template, WebTemplate)]
#[template(path = "new_item.html")]
pub struct NewItemTemplate {
    pub categories: Vec<CategoryRow>,
}

fn list_view_url(list_id: i64) -> String {
    format!("/lists/{list_id}/view")
}

fn user_lists_url(user_id: i64) -> String {
    format!("/users/{user_id}/lists/view")
}

/// GET /
pub async fn homepage(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let users = users::get_users(&state.db)
        .await
        .map_err(reject("Could not load users."))?;

    Ok(IndexTemplate { users })
}

/// GET /users/{user_id}/lists/view
#[instrument(skip(state))]
pub async fn view_user_lists(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = users::find_user(&state.db, user_id)
        .await
        .map_err(reject("Could not load user."))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let shopping_lists = shopping_lists::get_user_shopping_lists(&state.db, user_id)
        .await
        .map_err(reject("Could not load shopping lists."))?;

    Ok(UserListsTemplate {
        user,
        shopping_lists,
    })
}

/// GET /lists/{list_id}/view
#[instrument(skip(state))]
pub async fn view_list_detail(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let shopping_list = shopping_lists::find_shopping_list(&state.db, list_id)
        .await
        .map_err(reject("Could not load shopping list."))?
        .ok_or_else(|| ApiError::not_found("Shopping list not found"))?;

    let user = users::find_user(&state.db, shopping_list.user_id)
        .await
        .map_err(reject("Could not load shopping list."))?
        .ok_or_else(|| ApiError::not_found("Shopping list not found"))?;

    let items = list_items::get_list_items(&state.db, list_id)
        .await
        .map_err(reject("Could not load list items."))?;

    Ok(ListDetailTemplate {
        shopping_list,
        user,
        items,
    })
}

/// GET /lists/{list_id}/items/add
pub async fn show_add_item_form(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let shopping_list = shopping_lists::find_shopping_list(&state.db, list_id)
        .await
        .map_err(reject("Could not load shopping list."))?
        .ok_or_else(|| ApiError::not_found("List not found"))?;

    let items = items::get_items(&state.db)
        .await
        .map_err(reject("Could not load items."))?;

    Ok(AddItemTemplate {
        shopping_list,
        items,
    })
}

/// POST /lists/{list_id}/items/add
pub async fn add_item_to_list_form(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
    Form(form): Form<ListItemAdd>,
) -> Result<Redirect, ApiError> {
    list_items::add_item_to_list(&state.db, list_id, form.item_id, form.quantity)
        .await
        .map_err(reject("Error adding item."))?;

    Ok(Redirect::to(&list_view_url(list_id)))
}

/// POST /list_items/{list_item_id}/purchased/
pub async fn mark_item_purchased_form(
    State(state): State<Arc<AppState>>,
    Path(list_item_id): Path<i64>,
    Form(form): Form<PurchasedForm>,
) -> Result<Redirect, ApiError> {
    list_items::mark_list_item_purchased(&state.db, list_item_id, form.is_purchased())
        .await
        .map_err(reject("Failed to update item status."))?;

    let list_id = list_items::find_list_id(&state.db, list_item_id)
        .await
        .map_err(reject("Item not found in any list"))?;

    Ok(Redirect::to(&list_view_url(list_id)))
}

/// POST /list_items/{list_item_id}/delete/
pub async fn delete_item_form(
    State(state): State<Arc<AppState>>,
    Path(list_item_id): Path<i64>,
) -> Result<Redirect, ApiError> {
    // Resolve the owning list first; it is gone once the item is
    let list_id = list_items::find_list_id(&state.db, list_item_id)
        .await
        .map_err(reject("Item not found in any list"))?;

    list_items::delete_list_item(&state.db, list_item_id)
        .await
        .map_err(reject("Failed to delete item."))?;

    Ok(Redirect::to(&list_view_url(list_id)))
}

/// POST /users/add
pub async fn add_user_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<UserCreate>,
) -> Result<Redirect, ApiError> {
    users::create_user(&state.db, &form.username, &form.email)
        .await
        .map_err(reject("User creation failed."))?;

    Ok(Redirect::to("/"))
}

/// POST /users/{user_id}/delete - Delete a user with all lists and items
pub async fn delete_user_form(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Redirect, ApiError> {
    users::delete_user(&state.db, user_id)
        .await
        .map_err(reject("Error deleting user."))?;

    Ok(Redirect::to("/"))
}

/// POST /users/{user_id}/lists/add
pub async fn create_list_form(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Form(form): Form<ShoppingListForm>,
) -> Result<Redirect, ApiError> {
    shopping_lists::create_shopping_list(&state.db, user_id, &form.list_name)
        .await
        .map_err(reject("List creation failed."))?;

    Ok(Redirect::to(&user_lists_url(user_id)))
}

/// POST /lists/{list_id}/delete
pub async fn delete_list_form(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> Result<Redirect, ApiError> {
    shopping_lists::delete_shopping_list(&state.db, list_id)
        .await
        .map_err(reject("List deletion failed."))?;

    Ok(Redirect::to("/"))
}

/// POST /users/{user_id}/lists/{list_id}/delete
pub async fn delete_user_list_form(
    State(state): State<Arc<AppState>>,
    Path((user_id, list_id)): Path<(i64, i64)>,
) -> Result<Redirect, ApiError> {
    shopping_lists::delete_shopping_list(&state.db, list_id)
        .await
        .map_err(reject("Error deleting list."))?;

    Ok(Redirect::to(&user_lists_url(user_id)))
}

/// GET /items/new
pub async fn new_item_form(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = categories::get_categories(&state.db)
        .await
        .map_err(reject("Could not load categories."))?;

    Ok(NewItemTemplate { categories })
}

/// POST /items/new
pub async fn create_item_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ItemCreate>,
) -> Result<Redirect, ApiError> {
    items::create_item(&state.db, &form.item_name, form.category_id, &form.unit)
        .await
        .map_err(reject("Failed to create item."))?;

    Ok(Redirect::to("/items/new"))
}
