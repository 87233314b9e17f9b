//! User-owned transactions: dated monetary entries against an account and category.
//!
//! A transaction has no stored owner. Ownership is derived transitively
//! through the category, so every query joins onto the category table and
//! applies the ownership predicate there.

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
mod query;

pub use create::create_transaction_endpoint;
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_transaction,
    get_transactions, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{NewTransaction, Transaction, TransactionChanges, TransactionPayload};
pub use edit::{patch_transaction_endpoint, update_transaction_endpoint};
pub use list::{get_transaction_endpoint, get_transactions_endpoint};
pub use query::{TransactionFilter, TransactionListParams};

/// The state needed for the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionEndpointState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}
