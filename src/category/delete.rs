//! The endpoint for deleting a transaction category.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    category::{CategoryEndpointState, delete_category},
    database_id::DatabaseId,
    user::UserID,
};

/// Handle a request to delete a category owned by the calling user.
pub async fn delete_category_endpoint(
    State(state): State<CategoryEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(category_id): Path<DatabaseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    delete_category(category_id, user_id, &connection)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
