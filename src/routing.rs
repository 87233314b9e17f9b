//! Application router configuration with protected and open route definitions.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    AppState, Error,
    account::{
        create_account_endpoint, delete_account_endpoint, get_account_endpoint,
        get_accounts_endpoint, patch_account_endpoint, update_account_endpoint,
    },
    account_type::{
        create_account_type_endpoint, get_account_type_endpoint, get_account_types_endpoint,
    },
    auth::{auth_guard, create_token_endpoint},
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
        get_category_endpoint, patch_category_endpoint, update_category_endpoint,
    },
    endpoints,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        get_transactions_endpoint, patch_transaction_endpoint, update_transaction_endpoint,
    },
    user::{
        get_me_endpoint, patch_me_endpoint, register_user_endpoint, update_me_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Registration, token issuance, and the account type catalogue are open;
/// every other route requires a bearer token. A path that matches with an
/// unsupported method yields 405, an unmatched path the JSON 404.
pub fn build_router(state: AppState) -> Router {
    let open_routes = Router::new()
        .route(endpoints::CREATE_USER, post(register_user_endpoint))
        .route(endpoints::CREATE_TOKEN, post(create_token_endpoint))
        .route(
            endpoints::ACCOUNT_TYPES,
            get(get_account_types_endpoint).post(create_account_type_endpoint),
        )
        .route(endpoints::ACCOUNT_TYPE, get(get_account_type_endpoint));

    let protected_routes = Router::new()
        .route(
            endpoints::ME,
            get(get_me_endpoint)
                .put(update_me_endpoint)
                .patch(patch_me_endpoint),
        )
        .route(
            endpoints::ACCOUNTS,
            get(get_accounts_endpoint).post(create_account_endpoint),
        )
        .route(
            endpoints::ACCOUNT,
            get(get_account_endpoint)
                .put(update_account_endpoint)
                .patch(patch_account_endpoint)
                .delete(delete_account_endpoint),
        )
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .patch(patch_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .patch(patch_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(open_routes)
        .fallback(get_not_found)
        .with_state(state)
}

/// The fallback for paths that match no route.
async fn get_not_found() -> Error {
    Error::NotFound
}
