//! The field-level error map reported to clients on validation failure.

use std::{collections::BTreeMap, fmt::Display};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::Error;

/// The error message for a required field that was not supplied.
pub const REQUIRED: &str = "This field is required.";

/// A map from field name to the list of error messages for that field.
///
/// All fields of a payload are validated before any of them touches the
/// database, so a single response reports every invalid field at once.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error map holding a single message for `field`.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record an error `message` against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Whether any error has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert the collected errors into a `Result`.
    ///
    /// Returns `Ok(())` if no error was recorded, otherwise [Error::Validation]
    /// holding the map.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

/// Validate a required text field: present, non-blank, and at most
/// `max_length` characters. Records errors against `field` and returns the
/// accepted value, if any.
pub fn check_required_string(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max_length: usize,
) -> Option<String> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(raw) => check_string(errors, field, raw, max_length),
    }
}

/// Validate a present text field: non-blank and at most `max_length` characters.
pub fn check_string(
    errors: &mut ValidationErrors,
    field: &str,
    raw: &str,
    max_length: usize,
) -> Option<String> {
    if raw.trim().is_empty() {
        errors.add(field, "This field may not be blank.");
        return None;
    }

    check_label(errors, field, raw, max_length)
}

/// Validate a present text field that may be blank, e.g. an icon label:
/// at most `max_length` characters.
pub fn check_label(
    errors: &mut ValidationErrors,
    field: &str,
    raw: &str,
    max_length: usize,
) -> Option<String> {
    if raw.chars().count() > max_length {
        errors.add(
            field,
            format!("Ensure this field has no more than {max_length} characters."),
        );
        return None;
    }

    Some(raw.to_owned())
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let formatted = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect::<Vec<_>>()
            .join("; ");

        write!(f, "{formatted}")
    }
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}
