//! The endpoint for deleting an account.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    account::{AccountEndpointState, delete_account},
    database_id::DatabaseId,
    user::UserID,
};

/// Handle a request to delete an account owned by the calling user.
pub async fn delete_account_endpoint(
    State(state): State<AccountEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<DatabaseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    delete_account(account_id, user_id, &connection)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod delete_account_endpoint_tests {
    use axum::http::StatusCode;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{get_test_server_with_state, seed_account, seed_account_type, seed_user},
    };

    #[tokio::test]
    async fn delete_own_account_succeeds() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");
        let account_type_id = seed_account_type(&state, "Wallet");
        let account = seed_account(&state, user_id, "Checking", account_type_id);

        let response = server
            .delete(&format_endpoint(endpoints::ACCOUNT, account.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .await;

        response.assert_status(StatusCode::NO_CONTENT);

        let retrieve = server
            .get(&format_endpoint(endpoints::ACCOUNT, account.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .await;
        retrieve.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_foreign_account_is_not_found() {
        let (server, state) = get_test_server_with_state();
        let (_, token) = seed_user(&state, "foo@bar.baz");
        let (other_id, _) = seed_user(&state, "other@bar.baz");
        let account_type_id = seed_account_type(&state, "Wallet");
        let foreign = seed_account(&state, other_id, "Foreign", account_type_id);

        let response = server
            .delete(&format_endpoint(endpoints::ACCOUNT, foreign.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
