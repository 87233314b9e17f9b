//! Core user domain types and payload validation.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    password::{MIN_PASSWORD_LENGTH, PasswordHash, ValidatedPassword},
    validation::{REQUIRED, ValidationErrors},
};

/// The maximum number of characters allowed in an email address.
pub const MAX_EMAIL_LENGTH: usize = 255;
/// The maximum number of characters allowed in a display name.
pub const MAX_NAME_LENGTH: usize = 255;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
///
/// The email is the unique login identifier and is stored lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's email address, normalized to lower-case.
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// Whether the user may log in.
    pub is_active: bool,
    /// Whether the user is an administrator.
    pub is_staff: bool,
}

/// The wire representation of a user. Credentials are never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's email address.
    pub email: String,
    /// The user's display name.
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// A user that has been validated but not yet inserted into the database.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// The normalized email address.
    pub email: String,
    /// The display name.
    pub name: String,
    /// The hash of the user's password.
    pub password_hash: PasswordHash,
}

/// The fields a client may supply when creating or updating a user.
///
/// Every field is optional so that missing values surface as field-level
/// validation errors instead of deserializer rejections. Unknown fields,
/// including read-only ones such as `id`, are silently ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserPayload {
    /// The email address to register or change to.
    pub email: Option<String>,
    /// The raw password to set.
    pub password: Option<String>,
    /// The display name.
    pub name: Option<String>,
}

/// A validated payload with every field present.
#[derive(Debug, Clone)]
pub struct ValidatedUser {
    /// The normalized email address.
    pub email: String,
    /// The display name.
    pub name: String,
    /// The validated raw password, not yet hashed.
    pub password: ValidatedPassword,
}

/// The validated subset of fields present in a partial update.
#[derive(Debug, Default, Clone)]
pub struct UserChanges {
    /// The normalized email address, if supplied.
    pub email: Option<String>,
    /// The display name, if supplied.
    pub name: Option<String>,
    /// The validated raw password, if supplied.
    pub password: Option<ValidatedPassword>,
}

impl UserPayload {
    /// Validate the payload with all fields required (create and full update).
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every missing or invalid field.
    pub fn validate(self) -> Result<ValidatedUser, Error> {
        let mut errors = ValidationErrors::new();

        let email = match &self.email {
            None => {
                errors.add("email", REQUIRED);
                None
            }
            Some(raw) => apply_field(&mut errors, "email", validate_email(raw)),
        };

        let name = match &self.name {
            None => {
                errors.add("name", REQUIRED);
                None
            }
            Some(raw) => apply_field(&mut errors, "name", validate_name(raw)),
        };

        let password = match &self.password {
            None => {
                errors.add("password", REQUIRED);
                None
            }
            Some(raw) => apply_field(&mut errors, "password", validate_password(raw)),
        };

        errors.into_result()?;

        // All three are present whenever no error was recorded.
        match (email, name, password) {
            (Some(email), Some(name), Some(password)) => Ok(ValidatedUser {
                email,
                name,
                password,
            }),
            _ => Err(Error::Validation(ValidationErrors::new())),
        }
    }

    /// Validate only the fields present in the payload (partial update).
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every invalid field.
    pub fn validate_partial(self) -> Result<UserChanges, Error> {
        let mut errors = ValidationErrors::new();
        let mut changes = UserChanges::default();

        if let Some(raw) = &self.email {
            changes.email = apply_field(&mut errors, "email", validate_email(raw));
        }

        if let Some(raw) = &self.name {
            changes.name = apply_field(&mut errors, "name", validate_name(raw));
        }

        if let Some(raw) = &self.password {
            changes.password = apply_field(&mut errors, "password", validate_password(raw));
        }

        errors.into_result()?;

        Ok(changes)
    }
}

fn apply_field<T>(
    errors: &mut ValidationErrors,
    field: &str,
    result: Result<T, String>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

/// Normalize and validate an email address.
///
/// The address is trimmed and lower-cased. It must be non-empty, contain a
/// single `@` with non-empty local and domain parts, carry no whitespace,
/// and be at most [MAX_EMAIL_LENGTH] characters.
pub fn validate_email(raw: &str) -> Result<String, String> {
    let email = raw.trim().to_lowercase();

    if email.is_empty() {
        return Err("This field may not be blank.".to_owned());
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {MAX_EMAIL_LENGTH} characters."
        ));
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
    {
        return Err("Enter a valid email address.".to_owned());
    }

    Ok(email)
}

fn validate_name(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        return Err("This field may not be blank.".to_owned());
    }

    if raw.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {MAX_NAME_LENGTH} characters."
        ));
    }

    Ok(raw.to_owned())
}

fn validate_password(raw: &str) -> Result<ValidatedPassword, String> {
    if raw.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Ensure this field has at least {MIN_PASSWORD_LENGTH} characters."
        ));
    }

    Ok(ValidatedPassword::new_unchecked(raw))
}

#[cfg(test)]
mod user_payload_tests {
    use super::{UserPayload, validate_email};

    #[test]
    fn validate_email_normalizes_to_lower_case() {
        let email = validate_email("Foo.Bar@Example.COM").unwrap();

        assert_eq!(email, "foo.bar@example.com");
    }

    #[test]
    fn validate_email_rejects_missing_at_sign() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
    }

    #[test]
    fn validate_requires_all_fields() {
        let payload = UserPayload::default();

        let error = payload.validate().unwrap_err();

        let crate::Error::Validation(errors) = error else {
            panic!("expected a validation error");
        };
        let map = serde_json::to_value(&errors).unwrap();
        assert!(map.get("email").is_some());
        assert!(map.get("name").is_some());
        assert!(map.get("password").is_some());
    }

    #[test]
    fn validate_rejects_short_password() {
        let payload = UserPayload {
            email: Some("user@example.com".to_owned()),
            password: Some("shrt".to_owned()),
            name: Some("User".to_owned()),
        };

        assert!(payload.validate().is_err());
    }

    #[test]
    fn validate_partial_allows_missing_fields() {
        let payload = UserPayload {
            email: None,
            password: None,
            name: Some("New Name".to_owned()),
        };

        let changes = payload.validate_partial().unwrap();

        assert_eq!(changes.name.as_deref(), Some("New Name"));
        assert!(changes.email.is_none());
        assert!(changes.password.is_none());
    }
}
