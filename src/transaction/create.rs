//! The endpoint for creating a transaction.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    timezone::local_today,
    transaction::{TransactionEndpointState, TransactionPayload, create_transaction},
    user::UserID,
};

/// Handle a request to create a transaction.
///
/// The transaction date defaults to today in the server's configured
/// timezone. The referenced category and account must belong to the caller.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    Extension(user_id): Extension<UserID>,
    Json(payload): Json<TransactionPayload>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let new_transaction = payload.validate(user_id, today)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = create_transaction(new_transaction, &connection)?;

    Ok((StatusCode::CREATED, Json(transaction)).into_response())
}

#[cfg(test)]
mod create_transaction_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use time::OffsetDateTime;

    use crate::{
        category::CategoryKind,
        endpoints,
        test_utils::{
            get_test_server_with_state, seed_account, seed_account_type, seed_category, seed_user,
        },
    };

    #[tokio::test]
    async fn create_transaction_requires_authentication() {
        let (server, _state) = get_test_server_with_state();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({"amount": 200.0}))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_valid_transaction_succeeds() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");
        let account_type_id = seed_account_type(&state, "Wallet");
        let account = seed_account(&state, user_id, "Checking", account_type_id);
        let category = seed_category(&state, user_id, "Salary", CategoryKind::Income);

        let response = server
            .post(endpoints::TRANSACTIONS)
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({
                "amount": 300.0,
                "description": "New transaction 2",
                "paid": false,
                "transaction_date": "2020-08-18",
                "category": category.id,
                "account": account.id
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["amount"].as_f64(), Some(300.0));
        assert_eq!(body["transaction_date"].as_str(), Some("2020-08-18"));
        assert_eq!(body["category"].as_i64(), Some(category.id));
        assert_eq!(body["account"].as_i64(), Some(account.id));
    }

    #[tokio::test]
    async fn transaction_date_defaults_to_today() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");
        let account_type_id = seed_account_type(&state, "Wallet");
        let account = seed_account(&state, user_id, "Checking", account_type_id);
        let category = seed_category(&state, user_id, "Salary", CategoryKind::Income);

        let response = server
            .post(endpoints::TRANSACTIONS)
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({
                "amount": 300.0,
                "description": "New transaction",
                "category": category.id,
                "account": account.id
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        // The test state is configured with the UTC timezone.
        let today = OffsetDateTime::now_utc().date().to_string();
        assert_eq!(body["transaction_date"].as_str(), Some(today.as_str()));
        assert_eq!(body["paid"].as_bool(), Some(false));
    }

    #[tokio::test]
    async fn create_transaction_with_foreign_category_is_rejected() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");
        let (other_id, _) = seed_user(&state, "other@bar.baz");
        let account_type_id = seed_account_type(&state, "Wallet");
        let account = seed_account(&state, user_id, "Checking", account_type_id);
        let foreign_category = seed_category(&state, other_id, "Foreign", CategoryKind::Income);

        let response = server
            .post(endpoints::TRANSACTIONS)
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({
                "amount": 300.0,
                "description": "Should fail",
                "category": foreign_category.id,
                "account": account.id
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body.get("category").is_some());
    }

    #[tokio::test]
    async fn create_transaction_with_too_precise_amount_is_rejected() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");
        let account_type_id = seed_account_type(&state, "Wallet");
        let account = seed_account(&state, user_id, "Checking", account_type_id);
        let category = seed_category(&state, user_id, "Salary", CategoryKind::Income);

        let response = server
            .post(endpoints::TRANSACTIONS)
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({
                "amount": 1.005,
                "description": "Too precise",
                "category": category.id,
                "account": account.id
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body.get("amount").is_some());
    }
}
