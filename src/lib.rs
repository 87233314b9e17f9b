//! Ledgerly is a bookkeeping backend for personal finances.
//!
//! This library provides a JSON REST API where authenticated users manage
//! their accounts, transaction categories, and transactions. Account types
//! are a global catalogue readable without authentication; everything else
//! is scoped to the owning user.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

pub mod account;
pub mod account_type;
mod app_state;
pub mod auth;
pub mod category;
pub mod database_id;
mod db;
mod endpoints;
mod password;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;
pub mod transaction;
pub mod user;
mod validation;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{User, UserID, get_user_by_email, get_user_by_id};
pub use validation::ValidationErrors;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not carry a valid bearer token.
    #[error("authentication credentials were not provided")]
    Unauthenticated,

    /// The email and password combination did not match a registered user.
    ///
    /// This error intentionally does not distinguish between an unknown
    /// email and a wrong password.
    #[error("unable to authenticate with the provided credentials")]
    InvalidCredentials,

    /// One or more request fields failed validation.
    ///
    /// Holds the per-field error messages that are sent back to the client.
    #[error("invalid fields in the request: {0}")]
    Validation(ValidationErrors),

    /// The user's email already exists in the database.
    #[error("a user with this email already exists")]
    DuplicateEmail,

    /// The specified account type name already exists in the database.
    #[error("the account type \"{0}\" already exists in the database")]
    DuplicateAccountTypeName(String),

    /// The requested resource was not found.
    ///
    /// Rows that exist but belong to another user are reported with this
    /// error as well, so a caller cannot probe for foreign rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server,
    /// never sent to the client.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An error occurred while resolving the configured canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Authentication credentials were not provided."})),
            )
                .into_response(),
            Error::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "non_field_errors": ["Unable to authenticate with provided credentials."]
                })),
            )
                .into_response(),
            Error::Validation(errors) => errors.into_response(),
            Error::DuplicateEmail => {
                ValidationErrors::single("email", "A user with this email already exists.")
                    .into_response()
            }
            Error::DuplicateAccountTypeName(_) => {
                ValidationErrors::single("name", "An account type with this name already exists.")
                    .into_response()
            }
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Not found."})),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "Internal server error."})),
                )
                    .into_response()
            }
        }
    }
}
