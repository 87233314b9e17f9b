//! The endpoint for creating an account.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    account::{AccountEndpointState, AccountPayload, create_account},
    user::UserID,
};

/// Handle a request to create an account.
///
/// Ownership is stamped from the authenticated caller; any client-supplied
/// `user` value is ignored.
pub async fn create_account_endpoint(
    State(state): State<AccountEndpointState>,
    Extension(user_id): Extension<UserID>,
    Json(payload): Json<AccountPayload>,
) -> Result<Response, Error> {
    let new_account = payload.validate(user_id)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let account = create_account(new_account, &connection)?;

    Ok((StatusCode::CREATED, Json(account)).into_response())
}
