//! Core category domain types and payload validation.

use std::fmt::Display;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::DatabaseId,
    user::UserID,
    validation::{REQUIRED, ValidationErrors, check_label, check_required_string, check_string},
};

/// The maximum number of characters in a category name or icon label.
pub const MAX_CATEGORY_LABEL_LENGTH: usize = 50;

/// Whether a category records money earned or money spent.
///
/// Serialized on the wire and stored in the database as the two-letter
/// codes "IN" and "EX".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKind {
    /// Money earned, e.g. "Salary".
    #[serde(rename = "IN")]
    Income,
    /// Money spent, e.g. "Groceries".
    #[serde(rename = "EX")]
    Expense,
}

impl CategoryKind {
    /// The two-letter code used on the wire and in the database.
    pub fn as_code(&self) -> &'static str {
        match self {
            CategoryKind::Income => "IN",
            CategoryKind::Expense => "EX",
        }
    }

    /// Parse the two-letter code. Returns `None` for anything else.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "IN" => Some(CategoryKind::Income),
            "EX" => Some(CategoryKind::Expense),
            _ => None,
        }
    }
}

impl Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl ToSql for CategoryKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_code().into())
    }
}

impl FromSql for CategoryKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|code| CategoryKind::from_code(code).ok_or(FromSqlError::InvalidType))
    }
}

/// A user-owned label applied to transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// The category's ID in the application database.
    pub id: DatabaseId,
    /// The display name, e.g. "Salary".
    pub name: String,
    /// An optional icon label; empty when unset.
    pub icon_name: String,
    /// Whether the category records income or expenses.
    #[serde(rename = "category_type")]
    pub kind: CategoryKind,
    /// The owning user. Always stamped from the authenticated caller.
    #[serde(rename = "user")]
    pub user_id: UserID,
}

/// A category that has been validated but not yet inserted.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// The display name.
    pub name: String,
    /// An optional icon label; empty when unset.
    pub icon_name: String,
    /// Whether the category records income or expenses.
    pub kind: CategoryKind,
    /// The owning user.
    pub user_id: UserID,
}

/// The fields a client may supply when creating or updating a category.
///
/// `category_type` arrives as a raw string so that an unknown code is
/// reported as a field-level validation error rather than a deserializer
/// rejection. The owning user is never accepted from the client.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CategoryPayload {
    /// The display name.
    pub name: Option<String>,
    /// An optional icon label.
    pub icon_name: Option<String>,
    /// The category kind code, "IN" or "EX".
    pub category_type: Option<String>,
}

/// The validated subset of fields present in a partial update.
#[derive(Debug, Default, Clone)]
pub struct CategoryChanges {
    /// The display name, if supplied.
    pub name: Option<String>,
    /// The icon label, if supplied.
    pub icon_name: Option<String>,
    /// The category kind, if supplied.
    pub kind: Option<CategoryKind>,
}

impl CategoryPayload {
    /// Validate the payload with all fields required except the icon label,
    /// stamping ownership from the authenticated `user_id`.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every missing or invalid field.
    pub fn validate(self, user_id: UserID) -> Result<NewCategory, Error> {
        let mut errors = ValidationErrors::new();

        let name = check_required_string(
            &mut errors,
            "name",
            self.name.as_deref(),
            MAX_CATEGORY_LABEL_LENGTH,
        );
        let icon_name = match self.icon_name.as_deref() {
            None => Some(String::new()),
            Some(raw) => check_label(&mut errors, "icon_name", raw, MAX_CATEGORY_LABEL_LENGTH),
        };
        let kind = match self.category_type.as_deref() {
            None => {
                errors.add("category_type", REQUIRED);
                None
            }
            Some(raw) => check_category_kind(&mut errors, raw),
        };

        errors.into_result()?;

        match (name, icon_name, kind) {
            (Some(name), Some(icon_name), Some(kind)) => Ok(NewCategory {
                name,
                icon_name,
                kind,
                user_id,
            }),
            _ => Err(Error::Validation(ValidationErrors::new())),
        }
    }

    /// Validate only the fields present in the payload (partial update).
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every invalid field.
    pub fn validate_partial(self) -> Result<CategoryChanges, Error> {
        let mut errors = ValidationErrors::new();
        let mut changes = CategoryChanges::default();

        if let Some(raw) = &self.name {
            changes.name = check_string(&mut errors, "name", raw, MAX_CATEGORY_LABEL_LENGTH);
        }

        if let Some(raw) = &self.icon_name {
            changes.icon_name = check_label(&mut errors, "icon_name", raw, MAX_CATEGORY_LABEL_LENGTH);
        }

        if let Some(raw) = &self.category_type {
            changes.kind = check_category_kind(&mut errors, raw);
        }

        errors.into_result()?;

        Ok(changes)
    }
}

fn check_category_kind(errors: &mut ValidationErrors, raw: &str) -> Option<CategoryKind> {
    match CategoryKind::from_code(raw) {
        Some(kind) => Some(kind),
        None => {
            errors.add(
                "category_type",
                format!("\"{raw}\" is not a valid choice."),
            );
            None
        }
    }
}
