//! Database initialization for the application.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, account::create_account_table, account_type::create_account_type_table,
    auth::create_token_table, category::create_category_table,
    transaction::create_transaction_table, user::create_user_table,
};

/// Create the application tables.
///
/// The tables are created inside a single exclusive transaction so that a
/// partially initialized schema is never left behind. Foreign key
/// enforcement is switched on for the connection as a backstop; reference
/// validity is checked explicitly before inserts so that dangling
/// references surface as validation errors rather than SQL errors.
///
/// # Errors
/// Returns an error if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_token_table(&transaction)?;
    create_account_type_table(&transaction)?;
    create_account_table(&transaction)?;
    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
