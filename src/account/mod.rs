//! User-owned accounts, e.g. "Checking" or "Savings".
//!
//! Every operation is scoped to the authenticated owner: rows belonging to
//! other users are indistinguishable from absent rows.

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

pub use create::create_account_endpoint;
pub use db::{
    create_account, create_account_table, delete_account, get_account, get_accounts,
    update_account,
};
pub use delete::delete_account_endpoint;
pub use domain::{Account, AccountChanges, AccountPayload, NewAccount};
pub use edit::{patch_account_endpoint, update_account_endpoint};
pub use list::{get_account_endpoint, get_accounts_endpoint};

/// The state needed for the account endpoints.
#[derive(Debug, Clone)]
pub struct AccountEndpointState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
