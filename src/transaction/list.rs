//! The read endpoints for transactions, including the list filter.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    database_id::DatabaseId,
    timezone::local_today,
    transaction::{
        TransactionEndpointState, TransactionFilter, TransactionListParams, get_transaction,
        get_transactions,
    },
    user::UserID,
};

/// List the transactions visible to the calling user, narrowed by the
/// optional query parameters.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionEndpointState>,
    Extension(user_id): Extension<UserID>,
    Query(params): Query<TransactionListParams>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let filter = TransactionFilter::from_params(params, today)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transactions(user_id, &filter, &connection)?;

    Ok(Json(transactions).into_response())
}

/// Retrieve a single transaction visible to the calling user.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<DatabaseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = get_transaction(transaction_id, user_id, &connection)?;

    Ok(Json(transaction).into_response())
}
