//! Shared helpers for endpoint tests.

use axum_test::TestServer;
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState,
    account::{Account, NewAccount, create_account},
    account_type::{NewAccountType, create_account_type},
    auth::get_or_create_token,
    category::{Category, CategoryKind, NewCategory, create_category},
    database_id::DatabaseId,
    password::PasswordHash,
    routing::build_router,
    transaction::{NewTransaction, Transaction, create_transaction},
    user::{NewUser, UserID, create_user},
};

/// The raw password every seeded test user is given.
pub const TEST_PASSWORD: &str = "testpass123";

// The minimum bcrypt cost, to keep tests fast. Verification only depends on
// the cost embedded in the stored hash.
const TEST_HASH_COST: u32 = 4;

/// Create an [AppState] backed by an in-memory database.
pub fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, "Etc/UTC").expect("Could not create test app state")
}

/// Create a [TestServer] running the full application router.
pub fn get_test_server() -> TestServer {
    TestServer::new(build_router(get_test_app_state()))
}

/// Create a [TestServer] along with the state backing it, for tests that
/// need to seed the database directly.
pub fn get_test_server_with_state() -> (TestServer, AppState) {
    let state = get_test_app_state();
    let server =
        TestServer::new(build_router(state.clone()));

    (server, state)
}

/// Insert a user with [TEST_PASSWORD] directly into the database and issue a
/// bearer token for them. Returns the user's ID and the token key.
pub fn seed_user(state: &AppState, email: &str) -> (UserID, String) {
    let password_hash = PasswordHash::from_raw_password(TEST_PASSWORD, TEST_HASH_COST)
        .expect("Could not hash test password");

    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    let user = create_user(
        NewUser {
            email: email.to_owned(),
            name: "Test User".to_owned(),
            password_hash,
        },
        &connection,
    )
    .expect("Could not create test user");

    let token = get_or_create_token(user.id, &connection).expect("Could not create test token");

    (user.id, token.key)
}

/// Insert an account type directly into the database and return its ID.
pub fn seed_account_type(state: &AppState, name: &str) -> DatabaseId {
    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    create_account_type(
        NewAccountType {
            name: name.to_owned(),
            icon_name: String::new(),
        },
        &connection,
    )
    .expect("Could not create test account type")
    .id
}

/// Insert an account owned by `user_id` directly into the database.
pub fn seed_account(
    state: &AppState,
    user_id: UserID,
    name: &str,
    account_type_id: DatabaseId,
) -> Account {
    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    create_account(
        NewAccount {
            name: name.to_owned(),
            description: "Seeded account".to_owned(),
            account_type_id,
            user_id,
        },
        &connection,
    )
    .expect("Could not create test account")
}

/// Insert a category owned by `user_id` directly into the database.
pub fn seed_category(
    state: &AppState,
    user_id: UserID,
    name: &str,
    kind: CategoryKind,
) -> Category {
    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    create_category(
        NewCategory {
            name: name.to_owned(),
            icon_name: String::new(),
            kind,
            user_id,
        },
        &connection,
    )
    .expect("Could not create test category")
}

/// Insert a transaction directly into the database. The referenced category
/// and account must belong to `user_id`.
pub fn seed_transaction(
    state: &AppState,
    user_id: UserID,
    category_id: DatabaseId,
    account_id: DatabaseId,
    amount: f64,
    transaction_date: Date,
    paid: bool,
) -> Transaction {
    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    create_transaction(
        NewTransaction {
            amount,
            description: "Seeded transaction".to_owned(),
            paid,
            transaction_date,
            category_id,
            account_id,
            user_id,
        },
        &connection,
    )
    .expect("Could not create test transaction")
}
