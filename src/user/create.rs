//! The registration endpoint for creating a new user.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    Error,
    auth::get_or_create_token,
    password::PasswordHash,
    user::{NewUser, UserEndpointState, UserPayload, UserResponse, create_user},
};

/// Handle a request to register a new user.
///
/// The payload is validated in full before anything is written; a rejected
/// payload persists no row. On success the user's bearer token is issued
/// immediately and returned alongside the profile.
pub async fn register_user_endpoint(
    State(state): State<UserEndpointState>,
    Json(payload): Json<UserPayload>,
) -> Result<Response, Error> {
    let validated = payload.validate()?;
    let password_hash = PasswordHash::new(validated.password, PasswordHash::DEFAULT_COST)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let user = create_user(
        NewUser {
            email: validated.email,
            name: validated.name,
            password_hash,
        },
        &connection,
    )?;
    let token = get_or_create_token(user.id, &connection)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": UserResponse::from(&user),
            "auth_token": token.key,
        })),
    )
        .into_response())
}
