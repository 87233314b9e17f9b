//! Authentication middleware that validates bearer tokens on protected routes.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use rusqlite::Connection;

use crate::{AppState, Error, auth::get_token_user};

/// The state needed for the auth middleware and the token endpoint.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Middleware function that checks for a valid bearer token.
/// The user ID is placed into the request and then the request executed normally if the token is
/// valid, otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let bearer = match TypedHeader::<Authorization<Bearer>>::from_request_parts(&mut parts, &())
        .await
    {
        Ok(TypedHeader(Authorization(bearer))) => bearer,
        Err(_) => return Error::Unauthenticated.into_response(),
    };

    let user_id = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_token_user(bearer.token(), &connection) {
            Ok(user_id) => user_id,
            Err(Error::NotFound) => return Error::Unauthenticated.into_response(),
            Err(error) => return error.into_response(),
        }
    };

    parts.extensions.insert(user_id);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{Extension, Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;

    use crate::{
        endpoints,
        test_utils::{get_test_app_state, seed_user},
        user::UserID,
    };

    use super::auth_guard;

    const TEST_PROTECTED_ROUTE: &str = "/protected";

    async fn test_handler(Extension(user_id): Extension<UserID>) -> String {
        format!("user {user_id}")
    }

    fn get_test_server() -> (TestServer, String) {
        let state = get_test_app_state();
        let (_, token) = seed_user(&state, "foo@bar.baz");

        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state);

        (
            TestServer::new(app),
            token,
        )
    }

    #[tokio::test]
    async fn request_with_valid_token_reaches_handler() {
        let (server, token) = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("Authorization", format!("Bearer {token}"))
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "user 1");
    }

    #[tokio::test]
    async fn request_without_token_is_unauthorized() {
        let (server, _token) = get_test_server();

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_with_unknown_token_is_unauthorized() {
        let (server, _token) = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("Authorization", "Bearer 0123456789abcdef")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_with_malformed_header_is_unauthorized() {
        let (server, token) = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("Authorization", token)
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_route_still_reports_unauthorized_before_not_found() {
        let state = get_test_app_state();
        let server = TestServer::new(crate::build_router(state));

        let response = server.get(endpoints::ACCOUNTS).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
