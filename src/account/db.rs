//! Database operations for accounts.
//!
//! Every query that addresses an existing row carries the ownership
//! predicate `user_id = :user_id`, so foreign rows behave exactly like
//! absent rows.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    account::{Account, NewAccount},
    account_type::get_account_type,
    database_id::DatabaseId,
    user::UserID,
    validation::ValidationErrors,
};

/// Initialize the account table.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                account_type_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(account_type_id) REFERENCES account_type(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Check that `account_type_id` refers to an existing account type.
///
/// Account types are global, so no ownership check applies.
fn verify_account_type_reference(
    account_type_id: DatabaseId,
    connection: &Connection,
) -> Result<(), Error> {
    match get_account_type(account_type_id, connection) {
        Ok(_) => Ok(()),
        Err(Error::NotFound) => Err(Error::Validation(ValidationErrors::single(
            "account_type",
            format!("Invalid ID {account_type_id} - object does not exist."),
        ))),
        Err(error) => Err(error),
    }
}

/// Create an account and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] on the `account_type` field if the referenced account type does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_account(new_account: NewAccount, connection: &Connection) -> Result<Account, Error> {
    verify_account_type_reference(new_account.account_type_id, connection)?;

    connection.execute(
        "INSERT INTO account (name, description, account_type_id, user_id) VALUES (?1, ?2, ?3, ?4)",
        (
            &new_account.name,
            &new_account.description,
            new_account.account_type_id,
            new_account.user_id.as_i64(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Account {
        id,
        name: new_account.name,
        description: new_account.description,
        account_type_id: new_account.account_type_id,
        user_id: new_account.user_id,
    })
}

/// Retrieve the account with `id` owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the account does not exist or belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_account(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Account, Error> {
    connection
        .prepare(
            "SELECT id, name, description, account_type_id, user_id FROM account \
            WHERE id = :id AND user_id = :user_id",
        )?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_account_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve all accounts owned by `user_id` in insertion order.
pub fn get_accounts(user_id: UserID, connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare(
            "SELECT id, name, description, account_type_id, user_id FROM account \
            WHERE user_id = :user_id ORDER BY id ASC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_account_row)?
        .map(|maybe_account| maybe_account.map_err(|error| error.into()))
        .collect()
}

/// Persist changes to an account. The row is addressed through the ownership
/// predicate, so a foreign row reports [Error::NotFound].
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the account does not exist or belongs to another user,
/// - [Error::Validation] on the `account_type` field if the referenced account type does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_account(account: &Account, connection: &Connection) -> Result<(), Error> {
    verify_account_type_reference(account.account_type_id, connection)?;

    let rows_affected = connection.execute(
        "UPDATE account SET name = ?1, description = ?2, account_type_id = ?3 \
        WHERE id = ?4 AND user_id = ?5",
        (
            &account.name,
            &account.description,
            account.account_type_id,
            account.id,
            account.user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the account with `id` owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the account does not exist or belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_account(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM account WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_account_row(row: &Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        account_type_id: row.get(3)?,
        user_id: UserID::new(row.get(4)?),
    })
}
