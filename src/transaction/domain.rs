//! Core transaction domain types and payload validation.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::DatabaseId,
    user::UserID,
    validation::{REQUIRED, ValidationErrors, check_required_string, check_string},
};

/// The maximum number of characters in a transaction description.
pub const MAX_TRANSACTION_DESCRIPTION_LENGTH: usize = 512;

/// The largest absolute amount: 15 digits in total with 2 decimal places.
const MAX_AMOUNT: f64 = 10_000_000_000_000.0;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// There is no stored owner: a transaction belongs to whoever owns its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The transaction's ID in the application database.
    pub id: DatabaseId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether the transaction has been settled.
    pub paid: bool,
    /// When the transaction happened. Defaults to the day it is recorded.
    pub transaction_date: Date,
    /// The category the transaction belongs to.
    #[serde(rename = "category")]
    pub category_id: DatabaseId,
    /// The account the transaction is booked against.
    #[serde(rename = "account")]
    pub account_id: DatabaseId,
}

/// A transaction that has been validated but not yet inserted.
///
/// `user_id` identifies the authenticated caller; it is used to verify that
/// the referenced category and account belong to the caller, and is not
/// stored on the transaction row itself.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// The amount of money spent or earned.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether the transaction has been settled.
    pub paid: bool,
    /// When the transaction happened.
    pub transaction_date: Date,
    /// The referenced category.
    pub category_id: DatabaseId,
    /// The referenced account.
    pub account_id: DatabaseId,
    /// The authenticated caller, for reference ownership checks.
    pub user_id: UserID,
}

/// The fields a client may supply when creating or updating a transaction.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TransactionPayload {
    /// The amount of money spent or earned.
    pub amount: Option<f64>,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// Whether the transaction has been settled. Defaults to false.
    pub paid: Option<bool>,
    /// When the transaction happened. Defaults to today.
    pub transaction_date: Option<Date>,
    /// The referenced category ID.
    pub category: Option<DatabaseId>,
    /// The referenced account ID.
    pub account: Option<DatabaseId>,
}

/// The validated subset of fields present in a partial update.
#[derive(Debug, Default, Clone)]
pub struct TransactionChanges {
    /// The amount, if supplied.
    pub amount: Option<f64>,
    /// The description, if supplied.
    pub description: Option<String>,
    /// The paid flag, if supplied.
    pub paid: Option<bool>,
    /// The transaction date, if supplied.
    pub transaction_date: Option<Date>,
    /// The referenced category ID, if supplied.
    pub category_id: Option<DatabaseId>,
    /// The referenced account ID, if supplied.
    pub account_id: Option<DatabaseId>,
}

impl TransactionPayload {
    /// Validate the payload for creation or full update, stamping the
    /// authenticated caller for reference ownership checks.
    ///
    /// `today` is used when no transaction date is supplied.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every missing or invalid field.
    pub fn validate(self, user_id: UserID, today: Date) -> Result<NewTransaction, Error> {
        let mut errors = ValidationErrors::new();

        let amount = match self.amount {
            None => {
                errors.add("amount", REQUIRED);
                None
            }
            Some(amount) => check_amount(&mut errors, amount),
        };

        let description = check_required_string(
            &mut errors,
            "description",
            self.description.as_deref(),
            MAX_TRANSACTION_DESCRIPTION_LENGTH,
        );

        if self.category.is_none() {
            errors.add("category", REQUIRED);
        }
        if self.account.is_none() {
            errors.add("account", REQUIRED);
        }

        errors.into_result()?;

        match (amount, description, self.category, self.account) {
            (Some(amount), Some(description), Some(category_id), Some(account_id)) => {
                Ok(NewTransaction {
                    amount,
                    description,
                    paid: self.paid.unwrap_or(false),
                    transaction_date: self.transaction_date.unwrap_or(today),
                    category_id,
                    account_id,
                    user_id,
                })
            }
            _ => Err(Error::Validation(ValidationErrors::new())),
        }
    }

    /// Validate only the fields present in the payload (partial update).
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every invalid field.
    pub fn validate_partial(self) -> Result<TransactionChanges, Error> {
        let mut errors = ValidationErrors::new();
        let mut changes = TransactionChanges {
            paid: self.paid,
            transaction_date: self.transaction_date,
            category_id: self.category,
            account_id: self.account,
            ..TransactionChanges::default()
        };

        if let Some(amount) = self.amount {
            changes.amount = check_amount(&mut errors, amount);
        }

        if let Some(raw) = &self.description {
            changes.description = check_string(
                &mut errors,
                "description",
                raw,
                MAX_TRANSACTION_DESCRIPTION_LENGTH,
            );
        }

        errors.into_result()?;

        Ok(changes)
    }
}

/// Validate a monetary amount: finite, at most 15 digits in total, and at
/// most 2 decimal places.
fn check_amount(errors: &mut ValidationErrors, amount: f64) -> Option<f64> {
    if !amount.is_finite() {
        errors.add("amount", "A valid number is required.");
        return None;
    }

    if amount.abs() >= MAX_AMOUNT {
        errors.add(
            "amount",
            "Ensure that there are no more than 15 digits in total.",
        );
        return None;
    }

    let cents = amount * 100.0;
    if (cents - cents.round()).abs() > 1e-6 {
        errors.add(
            "amount",
            "Ensure that there are no more than 2 decimal places.",
        );
        return None;
    }

    Some(amount)
}

#[cfg(test)]
mod transaction_payload_tests {
    use time::macros::date;

    use crate::user::UserID;

    use super::TransactionPayload;

    fn valid_payload() -> TransactionPayload {
        TransactionPayload {
            amount: Some(200.0),
            description: Some("New transaction".to_owned()),
            paid: Some(false),
            transaction_date: Some(date!(2020 - 08 - 18)),
            category: Some(1),
            account: Some(1),
        }
    }

    #[test]
    fn validate_accepts_complete_payload() {
        let new_transaction = valid_payload()
            .validate(UserID::new(1), date!(2024 - 01 - 01))
            .unwrap();

        assert_eq!(new_transaction.amount, 200.0);
        assert_eq!(new_transaction.transaction_date, date!(2020 - 08 - 18));
    }

    #[test]
    fn validate_defaults_date_to_today_and_paid_to_false() {
        let today = date!(2024 - 01 - 01);
        let payload = TransactionPayload {
            transaction_date: None,
            paid: None,
            ..valid_payload()
        };

        let new_transaction = payload.validate(UserID::new(1), today).unwrap();

        assert_eq!(new_transaction.transaction_date, today);
        assert!(!new_transaction.paid);
    }

    #[test]
    fn validate_rejects_more_than_two_decimal_places() {
        let payload = TransactionPayload {
            amount: Some(1.005),
            ..valid_payload()
        };

        assert!(payload.validate(UserID::new(1), date!(2024 - 01 - 01)).is_err());
    }

    #[test]
    fn validate_rejects_amounts_with_too_many_digits() {
        let payload = TransactionPayload {
            amount: Some(10_000_000_000_000.0),
            ..valid_payload()
        };

        assert!(payload.validate(UserID::new(1), date!(2024 - 01 - 01)).is_err());
    }

    #[test]
    fn validate_requires_references() {
        let payload = TransactionPayload {
            category: None,
            account: None,
            ..valid_payload()
        };

        let error = payload
            .validate(UserID::new(1), date!(2024 - 01 - 01))
            .unwrap_err();

        let crate::Error::Validation(errors) = error else {
            panic!("expected a validation error");
        };
        let map = serde_json::to_value(&errors).unwrap();
        assert!(map.get("category").is_some());
        assert!(map.get("account").is_some());
    }

    #[test]
    fn validate_partial_accepts_single_field() {
        let payload = TransactionPayload {
            paid: Some(true),
            ..TransactionPayload::default()
        };

        let changes = payload.validate_partial().unwrap();

        assert_eq!(changes.paid, Some(true));
        assert!(changes.amount.is_none());
    }
}
