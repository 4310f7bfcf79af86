//! Database repositories
//!
//! Repository pattern for database access, separating data access logic
//! from the request handlers. Every operation acquires its own connection
//! from the `Database` provider and releases it before returning.

pub mod categories;
pub mod items;
pub mod list_items;
pub mod shopping_lists;
pub mod users;
