//! The global account type catalogue, e.g. "Wallet" or "Savings".
//!
//! Account types are not owned by any user: the list is readable without
//! authentication and creation is unscoped. There is no update or delete
//! surface.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod create;
mod db;
mod domain;
mod list;

pub use create::create_account_type_endpoint;
pub use db::{
    create_account_type, create_account_type_table, get_account_type, get_all_account_types,
};
pub use domain::{AccountType, AccountTypePayload, NewAccountType};
pub use list::{get_account_type_endpoint, get_account_types_endpoint};

/// The state needed for the account type endpoints.
#[derive(Debug, Clone)]
pub struct AccountTypeEndpointState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountTypeEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
