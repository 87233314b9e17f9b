//! The endpoints for updating an account.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    account::{AccountEndpointState, AccountPayload, get_account, update_account},
    database_id::DatabaseId,
    user::UserID,
};

/// Handle a full update of an account. All writable fields are required.
pub async fn update_account_endpoint(
    State(state): State<AccountEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<DatabaseId>,
    Json(payload): Json<AccountPayload>,
) -> Result<Response, Error> {
    let validated = payload.validate(user_id)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let mut account = get_account(account_id, user_id, &connection)?;
    account.name = validated.name;
    account.description = validated.description;
    account.account_type_id = validated.account_type_id;
    update_account(&account, &connection)?;

    Ok(Json(account).into_response())
}

/// Handle a partial update of an account. Only supplied fields change.
pub async fn patch_account_endpoint(
    State(state): State<AccountEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<DatabaseId>,
    Json(payload): Json<AccountPayload>,
) -> Result<Response, Error> {
    let changes = payload.validate_partial()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let mut account = get_account(account_id, user_id, &connection)?;
    if let Some(name) = changes.name {
        account.name = name;
    }
    if let Some(description) = changes.description {
        account.description = description;
    }
    if let Some(account_type_id) = changes.account_type_id {
        account.account_type_id = account_type_id;
    }
    update_account(&account, &connection)?;

    Ok(Json(account).into_response())
}
