//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/accounts/{account_id}',
//! use [format_endpoint].

/// The route for registering a new user.
pub const CREATE_USER: &str = "/api/user/create";
/// The route for exchanging credentials for a bearer token.
pub const CREATE_TOKEN: &str = "/api/user/token";
/// The route for the authenticated user's own profile.
pub const ME: &str = "/api/user/me";
/// The route for the global account type catalogue.
pub const ACCOUNT_TYPES: &str = "/api/account_type";
/// The route for a single account type.
pub const ACCOUNT_TYPE: &str = "/api/account_type/{account_type_id}";
/// The route for the authenticated user's accounts.
pub const ACCOUNTS: &str = "/api/accounts";
/// The route for a single account.
pub const ACCOUNT: &str = "/api/accounts/{account_id}";
/// The route for the authenticated user's transaction categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route for a single transaction category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route for the authenticated user's transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/accounts/{account_id}',
/// '{account_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
