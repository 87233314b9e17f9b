//! Database operations for account types.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    account_type::{AccountType, NewAccountType},
    database_id::DatabaseId,
};

/// Initialize the account type table.
pub fn create_account_type_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account_type (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                icon_name TEXT NOT NULL DEFAULT ''
                )",
        (),
    )?;

    Ok(())
}

/// Create an account type and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateAccountTypeName] if an account type with the same name already exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_account_type(
    new_account_type: NewAccountType,
    connection: &Connection,
) -> Result<AccountType, Error> {
    connection
        .execute(
            "INSERT INTO account_type (name, icon_name) VALUES (?1, ?2)",
            (&new_account_type.name, &new_account_type.icon_name),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateAccountTypeName(new_account_type.name.clone()),
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(AccountType {
        id,
        name: new_account_type.name,
        icon_name: new_account_type.icon_name,
    })
}

/// Retrieve a single account type by ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to an account type,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_account_type(id: DatabaseId, connection: &Connection) -> Result<AccountType, Error> {
    connection
        .prepare("SELECT id, name, icon_name FROM account_type WHERE id = :id")?
        .query_row(&[(":id", &id)], map_account_type_row)
        .map_err(|error| error.into())
}

/// Retrieve all account types in insertion order.
pub fn get_all_account_types(connection: &Connection) -> Result<Vec<AccountType>, Error> {
    connection
        .prepare("SELECT id, name, icon_name FROM account_type ORDER BY id ASC")?
        .query_map([], map_account_type_row)?
        .map(|maybe_account_type| maybe_account_type.map_err(|error| error.into()))
        .collect()
}

fn map_account_type_row(row: &Row) -> Result<AccountType, rusqlite::Error> {
    Ok(AccountType {
        id: row.get(0)?,
        name: row.get(1)?,
        icon_name: row.get(2)?,
    })
}

#[cfg(test)]
mod account_type_db_tests {
    use rusqlite::Connection;

    use crate::{Error, account_type::NewAccountType};

    use super::{
        create_account_type, create_account_type_table, get_account_type, get_all_account_types,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_account_type_table(&connection).expect("Could not create account type table");
        connection
    }

    #[test]
    fn create_account_type_succeeds() {
        let connection = get_test_db_connection();

        let account_type = create_account_type(
            NewAccountType {
                name: "Wallet".to_owned(),
                icon_name: "wallet".to_owned(),
            },
            &connection,
        )
        .expect("Could not create account type");

        assert!(account_type.id > 0);
        assert_eq!(account_type.name, "Wallet");
        assert_eq!(account_type.icon_name, "wallet");
    }

    #[test]
    fn create_account_type_fails_on_duplicate_name() {
        let connection = get_test_db_connection();
        let new_account_type = NewAccountType {
            name: "Wallet".to_owned(),
            icon_name: String::new(),
        };
        create_account_type(new_account_type.clone(), &connection).unwrap();

        let result = create_account_type(new_account_type, &connection);

        assert_eq!(
            result,
            Err(Error::DuplicateAccountTypeName("Wallet".to_owned()))
        );
    }

    #[test]
    fn get_account_type_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = get_account_type(999, &connection);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn get_all_account_types_returns_insertion_order() {
        let connection = get_test_db_connection();
        let first = create_account_type(
            NewAccountType {
                name: "Wallet".to_owned(),
                icon_name: String::new(),
            },
            &connection,
        )
        .unwrap();
        let second = create_account_type(
            NewAccountType {
                name: "Savings".to_owned(),
                icon_name: String::new(),
            },
            &connection,
        )
        .unwrap();

        let account_types = get_all_account_types(&connection).unwrap();

        assert_eq!(account_types, vec![first, second]);
    }
}
