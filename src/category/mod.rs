//! User-owned transaction categories, e.g. "Salary" (income) or "Groceries" (expense).
//!
//! Categories also carry the ownership of transactions: a transaction
//! belongs to whoever owns its category.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_category_endpoint;
pub use db::{
    create_category, create_category_table, delete_category, get_categories, get_category,
    update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryChanges, CategoryKind, CategoryPayload, NewCategory};
pub use edit::{patch_category_endpoint, update_category_endpoint};
pub use list::{get_categories_endpoint, get_category_endpoint};

/// The state needed for the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryEndpointState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
