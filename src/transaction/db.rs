//! Database operations for transactions.
//!
//! A transaction has no user column. Every query that addresses existing
//! rows joins onto the category table and applies the ownership predicate
//! `category.user_id = :user_id` there, so foreign rows behave exactly like
//! absent rows.

use rusqlite::{Connection, Row, types::Value};

use crate::{
    Error,
    account::get_account,
    category::get_category,
    database_id::DatabaseId,
    transaction::{NewTransaction, Transaction, TransactionFilter},
    user::UserID,
    validation::ValidationErrors,
};

/// Initialize the transaction table.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                paid INTEGER NOT NULL DEFAULT 0,
                transaction_date TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                account_id INTEGER NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Check that the referenced category and account both exist and belong to
/// the caller.
///
/// A reference that is absent and a reference owned by another user are
/// reported identically, so the caller cannot probe for foreign rows.
fn verify_references(
    category_id: DatabaseId,
    account_id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let mut errors = ValidationErrors::new();

    match get_category(category_id, user_id, connection) {
        Ok(_) => {}
        Err(Error::NotFound) => errors.add(
            "category",
            format!("Invalid ID {category_id} - object does not exist."),
        ),
        Err(error) => return Err(error),
    }

    match get_account(account_id, user_id, connection) {
        Ok(_) => {}
        Err(Error::NotFound) => errors.add(
            "account",
            format!("Invalid ID {account_id} - object does not exist."),
        ),
        Err(error) => return Err(error),
    }

    errors.into_result()
}

/// Create a transaction and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] on the `category` or `account` field if the
///   referenced row does not exist or belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    verify_references(
        new_transaction.category_id,
        new_transaction.account_id,
        new_transaction.user_id,
        connection,
    )?;

    connection.execute(
        "INSERT INTO \"transaction\" (amount, description, paid, transaction_date, category_id, account_id) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            new_transaction.amount,
            &new_transaction.description,
            new_transaction.paid,
            new_transaction.transaction_date,
            new_transaction.category_id,
            new_transaction.account_id,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        amount: new_transaction.amount,
        description: new_transaction.description,
        paid: new_transaction.paid,
        transaction_date: new_transaction.transaction_date,
        category_id: new_transaction.category_id,
        account_id: new_transaction.account_id,
    })
}

/// Retrieve the transaction with `id` visible to `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the transaction does not exist or its category belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT t.id, t.amount, t.description, t.paid, t.transaction_date, t.category_id, t.account_id \
            FROM \"transaction\" t \
            INNER JOIN category c ON t.category_id = c.id \
            WHERE t.id = :id AND c.user_id = :user_id",
        )?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_transaction_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve the transactions visible to `user_id`, narrowed by `filter`.
///
/// The ownership predicate and every filter constraint combine with AND.
/// Rows are returned in insertion order.
pub fn get_transactions(
    user_id: UserID,
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut query = String::from(
        "SELECT t.id, t.amount, t.description, t.paid, t.transaction_date, t.category_id, t.account_id \
        FROM \"transaction\" t \
        INNER JOIN category c ON t.category_id = c.id \
        WHERE c.user_id = ?",
    );
    let mut params: Vec<Value> = vec![Value::Integer(user_id.as_i64())];

    if let Some(paid) = filter.paid {
        query.push_str(" AND t.paid = ?");
        params.push(Value::Integer(paid as i64));
    }
    if let Some(category_id) = filter.category_id {
        query.push_str(" AND t.category_id = ?");
        params.push(Value::Integer(category_id));
    }
    if let Some(account_id) = filter.account_id {
        query.push_str(" AND t.account_id = ?");
        params.push(Value::Integer(account_id));
    }
    if let Some(date) = filter.date_gte {
        query.push_str(" AND t.transaction_date >= ?");
        params.push(Value::Text(date.to_string()));
    }
    if let Some(date) = filter.date_gt {
        query.push_str(" AND t.transaction_date > ?");
        params.push(Value::Text(date.to_string()));
    }
    if let Some(date) = filter.date_lt {
        query.push_str(" AND t.transaction_date < ?");
        params.push(Value::Text(date.to_string()));
    }
    if let Some(date) = filter.date_lte {
        query.push_str(" AND t.transaction_date <= ?");
        params.push(Value::Text(date.to_string()));
    }
    if let Some((start, end)) = filter.date_range {
        query.push_str(" AND t.transaction_date BETWEEN ? AND ?");
        params.push(Value::Text(start.to_string()));
        params.push(Value::Text(end.to_string()));
    }

    query.push_str(" ORDER BY t.id ASC");

    connection
        .prepare(&query)?
        .query_map(rusqlite::params_from_iter(params), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Persist changes to a transaction. The row is addressed through the
/// ownership predicate on its current category, so a foreign row reports
/// [Error::NotFound]. The new references are verified against the caller
/// first.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the transaction does not exist or is not visible to the caller,
/// - [Error::Validation] on the `category` or `account` field if a new
///   reference does not exist or belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    transaction: &Transaction,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    verify_references(
        transaction.category_id,
        transaction.account_id,
        user_id,
        connection,
    )?;

    let rows_affected = connection.execute(
        "UPDATE \"transaction\" \
        SET amount = ?1, description = ?2, paid = ?3, transaction_date = ?4, category_id = ?5, account_id = ?6 \
        WHERE id = ?7 AND category_id IN (SELECT id FROM category WHERE user_id = ?8)",
        (
            transaction.amount,
            &transaction.description,
            transaction.paid,
            transaction.transaction_date,
            transaction.category_id,
            transaction.account_id,
            transaction.id,
            user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the transaction with `id` visible to `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the transaction does not exist or is not visible to the caller,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" \
        WHERE id = ?1 AND category_id IN (SELECT id FROM category WHERE user_id = ?2)",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        paid: row.get(3)?,
        transaction_date: row.get(4)?,
        category_id: row.get(5)?,
        account_id: row.get(6)?,
    })
}
