//! Request payloads shared by the JSON API and the HTML forms

use serde::{Deserialize, Serialize};

/// New user (JSON body or form)
#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryCreate {
    pub category_name: String,
}

/// New catalog item (JSON body or form)
#[derive(Debug, Deserialize)]
pub struct ItemCreate {
    pub item_name: String,
    pub category_id: i64,
    pub unit: String,
}

#[derive(Debug, Deserialize)]
pub struct ShoppingListCreate {
    pub user_id: i64,
    pub list_name: String,
}

/// List name posted from a user's lists page
#[derive(Debug, Deserialize)]
pub struct ShoppingListForm {
    pub list_name: String,
}

/// Item added to a list (JSON body or form)
#[derive(Debug, Deserialize)]
pub struct ListItemAdd {
    pub item_id: i64,
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct QuantityUpdate {
    pub new_quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct PurchasedUpdate {
    pub is_purchased: bool,
}

/// Purchased toggle posted by the list page; checkboxes send strings
#[derive(Debug, Deserialize)]
pub struct PurchasedForm {
    pub is_purchased: String,
}

impl PurchasedForm {
    pub fn is_purchased(&self) -> bool {
        self.is_purchased.trim().eq_ignore_ascii_case("true")
    }
}

/// Acknowledgement returned by JSON write endpoints
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Ack {
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
            id: None,
        }
    }

    pub fn created(message: &'static str, id: i64) -> Self {
        Self {
            success: true,
            message,
            id: Some(id),
        }
    }
}
