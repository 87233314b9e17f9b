//! Database operations for transaction categories.
//!
//! Every query that addresses an existing row carries the ownership
//! predicate `user_id = :user_id`, so foreign rows behave exactly like
//! absent rows.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, NewCategory},
    database_id::DatabaseId,
    user::UserID,
};

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                icon_name TEXT NOT NULL DEFAULT '',
                category_type TEXT NOT NULL CHECK(category_type IN ('IN', 'EX')),
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Create a category and return it with its generated ID.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn create_category(
    new_category: NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, icon_name, category_type, user_id) VALUES (?1, ?2, ?3, ?4)",
        (
            &new_category.name,
            &new_category.icon_name,
            new_category.kind,
            new_category.user_id.as_i64(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name: new_category.name,
        icon_name: new_category.icon_name,
        kind: new_category.kind,
        user_id: new_category.user_id,
    })
}

/// Retrieve the category with `id` owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the category does not exist or belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_category(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, name, icon_name, category_type, user_id FROM category \
            WHERE id = :id AND user_id = :user_id",
        )?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_category_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve all categories owned by `user_id` in insertion order.
pub fn get_categories(user_id: UserID, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, icon_name, category_type, user_id FROM category \
            WHERE user_id = :user_id ORDER BY id ASC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_category_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Persist changes to a category. The row is addressed through the ownership
/// predicate, so a foreign row reports [Error::NotFound].
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the category does not exist or belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_category(category: &Category, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1, icon_name = ?2, category_type = ?3 \
        WHERE id = ?4 AND user_id = ?5",
        (
            &category.name,
            &category.icon_name,
            category.kind,
            category.id,
            category.user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the category with `id` owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the category does not exist or belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_category(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        icon_name: row.get(2)?,
        kind: row.get(3)?,
        user_id: UserID::new(row.get(4)?),
    })
}
