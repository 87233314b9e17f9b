//! Endpoints for the authenticated user's own profile.

use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    password::PasswordHash,
    user::{UserEndpointState, UserID, UserPayload, UserResponse, get_user_by_id, update_user},
};

/// Return the calling user's profile.
pub async fn get_me_endpoint(
    State(state): State<UserEndpointState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_user_by_id(user_id, &connection)?;

    Ok(Json(UserResponse::from(&user)).into_response())
}

/// Replace the calling user's profile. All writable fields are required.
pub async fn update_me_endpoint(
    State(state): State<UserEndpointState>,
    Extension(user_id): Extension<UserID>,
    Json(payload): Json<UserPayload>,
) -> Result<Response, Error> {
    let validated = payload.validate()?;
    let password_hash = PasswordHash::new(validated.password, PasswordHash::DEFAULT_COST)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let mut user = get_user_by_id(user_id, &connection)?;
    user.email = validated.email;
    user.name = validated.name;
    user.password_hash = password_hash;
    update_user(&user, &connection)?;

    Ok(Json(UserResponse::from(&user)).into_response())
}

/// Update the supplied subset of the calling user's profile fields.
pub async fn patch_me_endpoint(
    State(state): State<UserEndpointState>,
    Extension(user_id): Extension<UserID>,
    Json(payload): Json<UserPayload>,
) -> Result<Response, Error> {
    let changes = payload.validate_partial()?;
    let password_hash = match changes.password {
        Some(password) => Some(PasswordHash::new(password, PasswordHash::DEFAULT_COST)?),
        None => None,
    };

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let mut user = get_user_by_id(user_id, &connection)?;
    if let Some(email) = changes.email {
        user.email = email;
    }
    if let Some(name) = changes.name {
        user.name = name;
    }
    if let Some(password_hash) = password_hash {
        user.password_hash = password_hash;
    }
    update_user(&user, &connection)?;

    Ok(Json(UserResponse::from(&user)).into_response())
}

#[cfg(test)]
mod me_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::{get_test_server_with_state, seed_user},
        user::get_user_by_id,
    };

    #[tokio::test]
    async fn retrieve_profile_requires_authentication() {
        let (server, _state) = get_test_server_with_state();

        let response = server.get(endpoints::ME).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn retrieve_profile_returns_caller() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");

        let response = server
            .get(endpoints::ME)
            .add_header("Authorization", format!("Bearer {token}"))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["id"].as_i64(), Some(user_id.as_i64()));
        assert_eq!(body["email"].as_str(), Some("foo@bar.baz"));
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn patch_updates_only_supplied_fields() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");

        let response = server
            .patch(endpoints::ME)
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({"name": "Renamed User"}))
            .await;

        response.assert_status_ok();
        let connection = state.db_connection.lock().unwrap();
        let user = get_user_by_id(user_id, &connection).unwrap();
        assert_eq!(user.name, "Renamed User");
        assert_eq!(user.email, "foo@bar.baz");
    }

    #[tokio::test]
    async fn put_requires_all_fields() {
        let (server, state) = get_test_server_with_state();
        let (_, token) = seed_user(&state, "foo@bar.baz");

        let response = server
            .put(endpoints::ME)
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({"name": "Renamed User"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body.get("email").is_some());
        assert!(body.get("password").is_some());
    }

    #[tokio::test]
    async fn put_replaces_profile() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");

        let response = server
            .put(endpoints::ME)
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({
                "email": "new@bar.baz",
                "name": "New Name",
                "password": "newpassword1"
            }))
            .await;

        response.assert_status_ok();
        let connection = state.db_connection.lock().unwrap();
        let user = get_user_by_id(user_id, &connection).unwrap();
        assert_eq!(user.email, "new@bar.baz");
        assert_eq!(user.name, "New Name");
        assert!(user.password_hash.verify("newpassword1").unwrap());
    }

    #[tokio::test]
    async fn patch_cannot_take_anothers_email() {
        let (server, state) = get_test_server_with_state();
        seed_user(&state, "taken@bar.baz");
        let (_, token) = seed_user(&state, "foo@bar.baz");

        let response = server
            .patch(endpoints::ME)
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({"email": "taken@bar.baz"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body.get("email").is_some());
    }
}
