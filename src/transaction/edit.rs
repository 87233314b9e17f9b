//! The endpoints for updating a transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    database_id::DatabaseId,
    timezone::local_today,
    transaction::{
        Transaction, TransactionEndpointState, TransactionPayload, get_transaction,
        update_transaction,
    },
    user::UserID,
};

/// Handle a full update of a transaction.
///
/// As on creation, the paid flag defaults to false and the transaction date
/// defaults to today when not supplied.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<DatabaseId>,
    Json(payload): Json<TransactionPayload>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let validated = payload.validate(user_id, today)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = Transaction {
        id: transaction_id,
        amount: validated.amount,
        description: validated.description,
        paid: validated.paid,
        transaction_date: validated.transaction_date,
        category_id: validated.category_id,
        account_id: validated.account_id,
    };
    update_transaction(&transaction, user_id, &connection)?;

    Ok(Json(transaction).into_response())
}

/// Handle a partial update of a transaction. Only supplied fields change.
pub async fn patch_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<DatabaseId>,
    Json(payload): Json<TransactionPayload>,
) -> Result<Response, Error> {
    let changes = payload.validate_partial()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let mut transaction = get_transaction(transaction_id, user_id, &connection)?;
    if let Some(amount) = changes.amount {
        transaction.amount = amount;
    }
    if let Some(description) = changes.description {
        transaction.description = description;
    }
    if let Some(paid) = changes.paid {
        transaction.paid = paid;
    }
    if let Some(transaction_date) = changes.transaction_date {
        transaction.transaction_date = transaction_date;
    }
    if let Some(category_id) = changes.category_id {
        transaction.category_id = category_id;
    }
    if let Some(account_id) = changes.account_id {
        transaction.account_id = account_id;
    }
    update_transaction(&transaction, user_id, &connection)?;

    Ok(Json(transaction).into_response())
}

#[cfg(test)]
mod transaction_edit_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        category::CategoryKind,
        endpoints::{self, format_endpoint},
        test_utils::{
            get_test_server_with_state, seed_account, seed_account_type, seed_category,
            seed_transaction, seed_user,
        },
    };

    #[tokio::test]
    async fn put_replaces_transaction() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");
        let account_type_id = seed_account_type(&state, "Wallet");
        let account = seed_account(&state, user_id, "Checking", account_type_id);
        let category = seed_category(&state, user_id, "Salary", CategoryKind::Income);
        let transaction = seed_transaction(
            &state,
            user_id,
            category.id,
            account.id,
            200.0,
            date!(2020 - 08 - 18),
            false,
        );

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({
                "amount": 450.5,
                "description": "Updated transaction",
                "paid": true,
                "transaction_date": "2020-09-01",
                "category": category.id,
                "account": account.id
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["amount"].as_f64(), Some(450.5));
        assert_eq!(body["paid"].as_bool(), Some(true));
        assert_eq!(body["transaction_date"].as_str(), Some("2020-09-01"));
    }

    #[tokio::test]
    async fn patch_marks_transaction_as_paid() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");
        let account_type_id = seed_account_type(&state, "Wallet");
        let account = seed_account(&state, user_id, "Checking", account_type_id);
        let category = seed_category(&state, user_id, "Salary", CategoryKind::Income);
        let transaction = seed_transaction(
            &state,
            user_id,
            category.id,
            account.id,
            200.0,
            date!(2020 - 08 - 18),
            false,
        );

        let response = server
            .patch(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({"paid": true}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["paid"].as_bool(), Some(true));
        assert_eq!(body["amount"].as_f64(), Some(200.0));
        assert_eq!(body["transaction_date"].as_str(), Some("2020-08-18"));
    }

    #[tokio::test]
    async fn patch_cannot_move_transaction_into_foreign_category() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");
        let (other_id, _) = seed_user(&state, "other@bar.baz");
        let account_type_id = seed_account_type(&state, "Wallet");
        let account = seed_account(&state, user_id, "Checking", account_type_id);
        let category = seed_category(&state, user_id, "Salary", CategoryKind::Income);
        let foreign_category = seed_category(&state, other_id, "Foreign", CategoryKind::Income);
        let transaction = seed_transaction(
            &state,
            user_id,
            category.id,
            account.id,
            200.0,
            date!(2020 - 08 - 18),
            false,
        );

        let response = server
            .patch(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({"category": foreign_category.id}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body.get("category").is_some());
    }

    #[tokio::test]
    async fn put_on_foreign_transaction_is_not_found() {
        let (server, state) = get_test_server_with_state();
        let (user_id, token) = seed_user(&state, "foo@bar.baz");
        let (other_id, _) = seed_user(&state, "other@bar.baz");
        let account_type_id = seed_account_type(&state, "Wallet");
        let account = seed_account(&state, user_id, "Checking", account_type_id);
        let category = seed_category(&state, user_id, "Salary", CategoryKind::Income);
        let other_account = seed_account(&state, other_id, "Foreign", account_type_id);
        let other_category = seed_category(&state, other_id, "Foreign", CategoryKind::Income);
        let foreign = seed_transaction(
            &state,
            other_id,
            other_category.id,
            other_account.id,
            200.0,
            date!(2020 - 08 - 18),
            false,
        );

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, foreign.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&json!({
                "amount": 1.0,
                "description": "Hijacked",
                "category": category.id,
                "account": account.id
            }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
