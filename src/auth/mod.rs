//! Bearer-token authentication: token issuance, storage, and the request guard.

mod db;
mod domain;
mod issue_token;
mod middleware;

pub use db::{create_token_table, get_or_create_token, get_token_user};
pub use domain::{ApiToken, generate_token_key};
pub use issue_token::create_token_endpoint;
pub use middleware::{AuthState, auth_guard};
