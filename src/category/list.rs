//! The read endpoints for transaction categories.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    category::{CategoryEndpointState, get_categories, get_category},
    database_id::DatabaseId,
    user::UserID,
};

/// List the calling user's categories.
pub async fn get_categories_endpoint(
    State(state): State<CategoryEndpointState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_categories(user_id, &connection)?;

    Ok(Json(categories).into_response())
}

/// Retrieve a single category owned by the calling user.
pub async fn get_category_endpoint(
    State(state): State<CategoryEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(category_id): Path<DatabaseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let category = get_category(category_id, user_id, &connection)?;

    Ok(Json(category).into_response())
}
