//! The endpoint for creating a transaction category.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    category::{CategoryEndpointState, CategoryPayload, create_category},
    user::UserID,
};

/// Handle a request to create a category.
///
/// Ownership is stamped from the authenticated caller; any client-supplied
/// `user` value is ignored.
pub async fn create_category_endpoint(
    State(state): State<CategoryEndpointState>,
    Extension(user_id): Extension<UserID>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Response, Error> {
    let new_category = payload.validate(user_id)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let category = create_category(new_category, &connection)?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}
