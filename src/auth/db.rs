//! Database operations for bearer tokens.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    auth::{ApiToken, generate_token_key},
    user::UserID,
};

/// Initialize the token table and index.
pub fn create_token_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS api_token (
            id INTEGER PRIMARY KEY,
            key TEXT NOT NULL UNIQUE,
            user_id INTEGER NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_api_token_key ON api_token(key);",
    )?;

    Ok(())
}

/// Get the token for `user_id`, creating one if the user has none yet.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_or_create_token(user_id: UserID, connection: &Connection) -> Result<ApiToken, Error> {
    let existing = connection
        .prepare("SELECT key, created_at FROM api_token WHERE user_id = :user_id")?
        .query_row(&[(":user_id", &user_id.as_i64())], |row| {
            Ok(ApiToken {
                user_id,
                key: row.get(0)?,
                created_at: row.get(1)?,
            })
        });

    match existing {
        Ok(token) => Ok(token),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            let token = ApiToken {
                user_id,
                key: generate_token_key(),
                created_at: OffsetDateTime::now_utc(),
            };

            connection.execute(
                "INSERT INTO api_token (key, user_id, created_at) VALUES (?1, ?2, ?3)",
                (&token.key, token.user_id.as_i64(), token.created_at),
            )?;

            Ok(token)
        }
        Err(error) => Err(error.into()),
    }
}

/// Resolve a token key to the user it authenticates.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `key` is not a known token,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_token_user(key: &str, connection: &Connection) -> Result<UserID, Error> {
    connection
        .prepare("SELECT user_id FROM api_token WHERE key = :key")?
        .query_row(&[(":key", &key)], |row| row.get(0).map(UserID::new))
        .map_err(|error| error.into())
}

#[cfg(test)]
mod token_db_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        password::PasswordHash,
        user::{NewUser, create_user, create_user_table},
    };

    use super::{create_token_table, get_or_create_token, get_token_user};

    fn get_test_db_connection() -> (Connection, crate::user::User) {
        let connection = Connection::open_in_memory().unwrap();
        create_user_table(&connection).expect("Could not create user table");
        create_token_table(&connection).expect("Could not create token table");

        let user = create_user(
            NewUser {
                email: "foo@bar.baz".to_owned(),
                name: "Test User".to_owned(),
                password_hash: PasswordHash::new_unchecked("hunter2"),
            },
            &connection,
        )
        .expect("Could not create test user");

        (connection, user)
    }

    #[test]
    fn creates_token_on_first_call() {
        let (connection, user) = get_test_db_connection();

        let token = get_or_create_token(user.id, &connection).unwrap();

        assert_eq!(token.user_id, user.id);
        assert_eq!(token.key.len(), 64);
    }

    #[test]
    fn returns_same_token_on_second_call() {
        let (connection, user) = get_test_db_connection();

        let first = get_or_create_token(user.id, &connection).unwrap();
        let second = get_or_create_token(user.id, &connection).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn resolves_key_to_user() {
        let (connection, user) = get_test_db_connection();
        let token = get_or_create_token(user.id, &connection).unwrap();

        let resolved = get_token_user(&token.key, &connection).unwrap();

        assert_eq!(resolved, user.id);
    }

    #[test]
    fn unknown_key_is_not_found() {
        let (connection, _user) = get_test_db_connection();

        let result = get_token_user("deadbeef", &connection);

        assert_eq!(result, Err(Error::NotFound));
    }
}
