//! The endpoint for adding to the account type catalogue.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    account_type::{AccountTypeEndpointState, AccountTypePayload, create_account_type},
};

/// Handle a request to create an account type.
///
/// The catalogue is global: the new row is not associated with any user.
pub async fn create_account_type_endpoint(
    State(state): State<AccountTypeEndpointState>,
    Json(payload): Json<AccountTypePayload>,
) -> Result<Response, Error> {
    let new_account_type = payload.validate()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let account_type = create_account_type(new_account_type, &connection)?;

    Ok((StatusCode::CREATED, Json(account_type)).into_response())
}
