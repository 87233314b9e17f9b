//! Core account domain types and payload validation.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::DatabaseId,
    user::UserID,
    validation::{REQUIRED, ValidationErrors, check_required_string, check_string},
};

/// The maximum number of characters in an account name.
pub const MAX_ACCOUNT_NAME_LENGTH: usize = 50;
/// The maximum number of characters in an account description.
pub const MAX_ACCOUNT_DESCRIPTION_LENGTH: usize = 512;

/// A user-owned named ledger bucket holding transactions indirectly via categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    /// The account's ID in the application database.
    pub id: DatabaseId,
    /// The display name, e.g. "Checking".
    pub name: String,
    /// A free-form description.
    pub description: String,
    /// The global account type this account is labelled with.
    #[serde(rename = "account_type")]
    pub account_type_id: DatabaseId,
    /// The owning user. Always stamped from the authenticated caller.
    #[serde(rename = "user")]
    pub user_id: UserID,
}

/// An account that has been validated but not yet inserted.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// The display name.
    pub name: String,
    /// A free-form description.
    pub description: String,
    /// The referenced account type.
    pub account_type_id: DatabaseId,
    /// The owning user.
    pub user_id: UserID,
}

/// The fields a client may supply when creating or updating an account.
///
/// The owning user is never accepted from the client; a supplied `user`
/// value is silently ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AccountPayload {
    /// The display name.
    pub name: Option<String>,
    /// A free-form description.
    pub description: Option<String>,
    /// The referenced account type ID.
    pub account_type: Option<DatabaseId>,
}

/// The validated subset of fields present in a partial update.
#[derive(Debug, Default, Clone)]
pub struct AccountChanges {
    /// The display name, if supplied.
    pub name: Option<String>,
    /// The description, if supplied.
    pub description: Option<String>,
    /// The referenced account type ID, if supplied.
    pub account_type_id: Option<DatabaseId>,
}

impl AccountPayload {
    /// Validate the payload with all fields required (create and full update),
    /// stamping ownership from the authenticated `user_id`.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every missing or invalid field.
    pub fn validate(self, user_id: UserID) -> Result<NewAccount, Error> {
        let mut errors = ValidationErrors::new();

        let name = check_required_string(
            &mut errors,
            "name",
            self.name.as_deref(),
            MAX_ACCOUNT_NAME_LENGTH,
        );
        let description = check_required_string(
            &mut errors,
            "description",
            self.description.as_deref(),
            MAX_ACCOUNT_DESCRIPTION_LENGTH,
        );

        if self.account_type.is_none() {
            errors.add("account_type", REQUIRED);
        }

        errors.into_result()?;

        match (name, description, self.account_type) {
            (Some(name), Some(description), Some(account_type_id)) => Ok(NewAccount {
                name,
                description,
                account_type_id,
                user_id,
            }),
            _ => Err(Error::Validation(ValidationErrors::new())),
        }
    }

    /// Validate only the fields present in the payload (partial update).
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every invalid field.
    pub fn validate_partial(self) -> Result<AccountChanges, Error> {
        let mut errors = ValidationErrors::new();
        let mut changes = AccountChanges {
            account_type_id: self.account_type,
            ..AccountChanges::default()
        };

        if let Some(raw) = &self.name {
            changes.name = check_string(&mut errors, "name", raw, MAX_ACCOUNT_NAME_LENGTH);
        }

        if let Some(raw) = &self.description {
            changes.description =
                check_string(&mut errors, "description", raw, MAX_ACCOUNT_DESCRIPTION_LENGTH);
        }

        errors.into_result()?;

        Ok(changes)
    }
}
