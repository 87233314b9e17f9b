//! The endpoints for updating a transaction category.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    category::{CategoryEndpointState, CategoryPayload, get_category, update_category},
    database_id::DatabaseId,
    user::UserID,
};

/// Handle a full update of a category. All writable fields except the icon
/// label are required.
pub async fn update_category_endpoint(
    State(state): State<CategoryEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(category_id): Path<DatabaseId>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Response, Error> {
    let validated = payload.validate(user_id)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let mut category = get_category(category_id, user_id, &connection)?;
    category.name = validated.name;
    category.icon_name = validated.icon_name;
    category.kind = validated.kind;
    update_category(&category, &connection)?;

    Ok(Json(category).into_response())
}

/// Handle a partial update of a category. Only supplied fields change.
pub async fn patch_category_endpoint(
    State(state): State<CategoryEndpointState>,
    Extension(user_id): Extension<UserID>,
    Path(category_id): Path<DatabaseId>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Response, Error> {
    let changes = payload.validate_partial()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let mut category = get_category(category_id, user_id, &connection)?;
    if let Some(name) = changes.name {
        category.name = name;
    }
    if let Some(icon_name) = changes.icon_name {
        category.icon_name = icon_name;
    }
    if let Some(kind) = changes.kind {
        category.kind = kind;
    }
    update_category(&category, &connection)?;

    Ok(Json(category).into_response())
}
