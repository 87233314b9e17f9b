//! The read endpoints for accounts.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    account::{AccountEndpointState, get_account, get_accounts},
    database_id::DatabaseId,
    user::UserID,
};

/// List the calling user's accounts.
pub async fn get_accounts_endpoint(
    State(state): State<AccountEndpointState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let accounts = get_accounts(user_id, &connection)?;

    Ok(Json(accounts).into_response())
}

/// Retrieve a single account owned by the calling user.
pub async fn get_account_endpoint(
    State(state): State<AccountEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<DatabaseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let account = get_account(account_id, user_id, &connection)?;

    Ok(Json(account).into_response())
}
