//! The open read endpoints for the account type catalogue.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    account_type::{AccountTypeEndpointState, get_account_type, get_all_account_types},
    database_id::DatabaseId,
};

/// List every account type. No authentication is required.
pub async fn get_account_types_endpoint(
    State(state): State<AccountTypeEndpointState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let account_types = get_all_account_types(&connection)?;

    Ok(Json(account_types).into_response())
}

/// Retrieve a single account type. No authentication is required.
pub async fn get_account_type_endpoint(
    State(state): State<AccountTypeEndpointState>,
    Path(account_type_id): Path<DatabaseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let account_type = get_account_type(account_type_id, &connection)?;

    Ok(Json(account_type).into_response())
}
