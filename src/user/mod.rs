//! User registration and profile management.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod create;
mod db;
mod domain;
mod me;

pub use create::register_user_endpoint;
pub use db::{create_user, create_user_table, get_user_by_email, get_user_by_id, update_user};
pub use domain::{NewUser, User, UserChanges, UserID, UserPayload, UserResponse, ValidatedUser};
pub use me::{get_me_endpoint, patch_me_endpoint, update_me_endpoint};

/// The state needed for the user endpoints.
#[derive(Debug, Clone)]
pub struct UserEndpointState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UserEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
