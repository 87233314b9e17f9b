//! Core account type domain types and payload validation.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::DatabaseId,
    validation::{ValidationErrors, check_label, check_required_string},
};

/// The maximum number of characters in an account type name or icon label.
pub const MAX_ACCOUNT_TYPE_LABEL_LENGTH: usize = 50;

/// A global categorical label for accounts, e.g. "Wallet".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountType {
    /// The account type's ID in the application database.
    pub id: DatabaseId,
    /// The unique display name.
    pub name: String,
    /// An optional icon label; empty when unset.
    pub icon_name: String,
}

/// An account type that has been validated but not yet inserted.
#[derive(Debug, Clone)]
pub struct NewAccountType {
    /// The unique display name.
    pub name: String,
    /// An optional icon label; empty when unset.
    pub icon_name: String,
}

/// The fields a client may supply when creating an account type.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AccountTypePayload {
    /// The display name.
    pub name: Option<String>,
    /// An optional icon label.
    pub icon_name: Option<String>,
}

impl AccountTypePayload {
    /// Validate the payload for creation.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every missing or invalid field.
    pub fn validate(self) -> Result<NewAccountType, Error> {
        let mut errors = ValidationErrors::new();

        let name = check_required_string(
            &mut errors,
            "name",
            self.name.as_deref(),
            MAX_ACCOUNT_TYPE_LABEL_LENGTH,
        );
        let icon_name = match self.icon_name.as_deref() {
            None => Some(String::new()),
            Some(raw) => check_label(&mut errors, "icon_name", raw, MAX_ACCOUNT_TYPE_LABEL_LENGTH),
        };

        errors.into_result()?;

        match (name, icon_name) {
            (Some(name), Some(icon_name)) => Ok(NewAccountType { name, icon_name }),
            _ => Err(Error::Validation(ValidationErrors::new())),
        }
    }
}

#[cfg(test)]
mod account_type_payload_tests {
    use super::AccountTypePayload;

    #[test]
    fn validate_requires_name() {
        let payload = AccountTypePayload::default();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn validate_defaults_icon_to_empty() {
        let payload = AccountTypePayload {
            name: Some("Wallet".to_owned()),
            icon_name: None,
        };

        let new_account_type = payload.validate().unwrap();

        assert_eq!(new_account_type.name, "Wallet");
        assert_eq!(new_account_type.icon_name, "");
    }

    #[test]
    fn validate_rejects_over_long_name() {
        let payload = AccountTypePayload {
            name: Some("x".repeat(51)),
            icon_name: None,
        };

        assert!(payload.validate().is_err());
    }
}
