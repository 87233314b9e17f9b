//! The endpoint that exchanges credentials for a bearer token.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    Error,
    auth::{AuthState, get_or_create_token},
    user::get_user_by_email,
    validation::{REQUIRED, ValidationErrors},
};

/// The credentials a client exchanges for a bearer token.
#[derive(Debug, Default, Deserialize)]
pub struct TokenPayload {
    /// The email the user registered with.
    pub email: Option<String>,
    /// The user's raw password.
    pub password: Option<String>,
}

/// Handle a request to issue a bearer token.
///
/// Looks up the user by normalized email and verifies the password. A failed
/// lookup and a failed password check produce the same response, so the
/// endpoint cannot be used to probe which emails are registered.
pub async fn create_token_endpoint(
    State(state): State<AuthState>,
    Json(payload): Json<TokenPayload>,
) -> Result<Response, Error> {
    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) => (email.trim().to_lowercase(), password),
        (email, password) => {
            let mut errors = ValidationErrors::new();
            if email.is_none() {
                errors.add("email", REQUIRED);
            }
            if password.is_none() {
                errors.add("password", REQUIRED);
            }
            return Err(Error::Validation(errors));
        }
    };

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let user = match get_user_by_email(&email, &connection) {
        Ok(user) => user,
        Err(Error::NotFound) => return Err(Error::InvalidCredentials),
        Err(error) => return Err(error),
    };

    let password_matches = user
        .password_hash
        .verify(&password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !password_matches {
        return Err(Error::InvalidCredentials);
    }

    let token = get_or_create_token(user.id, &connection)?;

    Ok(Json(json!({"token": token.key})).into_response())
}
