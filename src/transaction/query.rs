//! Translation of list query parameters into predicate refinements.
//!
//! Every parameter is optional and the resulting constraints are combined
//! with logical AND on top of the ownership scope. Parameters arrive as raw
//! strings so that unparsable values surface as field-level validation
//! errors.

use serde::Deserialize;
use time::{Date, Duration, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, database_id::DatabaseId, validation::ValidationErrors};

/// The date format accepted by the date filter parameters, e.g. "2020-07-01".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The raw query parameters accepted by the transaction list endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TransactionListParams {
    /// Exact match on the paid flag.
    pub paid: Option<String>,
    /// Exact match on the referenced category ID.
    pub category: Option<String>,
    /// Exact match on the referenced account ID.
    pub account: Option<String>,
    /// Inclusive lower bound on the transaction date.
    pub date_gte: Option<String>,
    /// Exclusive lower bound on the transaction date.
    pub date_gt: Option<String>,
    /// Exclusive upper bound on the transaction date.
    pub date_lt: Option<String>,
    /// Inclusive upper bound on the transaction date.
    pub date_lte: Option<String>,
    /// Named shortcut resolving to a concrete date window.
    pub date_range: Option<String>,
}

/// The parsed predicate refinements for a transaction list query.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Exact match on the paid flag.
    pub paid: Option<bool>,
    /// Exact match on the referenced category ID.
    pub category_id: Option<DatabaseId>,
    /// Exact match on the referenced account ID.
    pub account_id: Option<DatabaseId>,
    /// Inclusive lower bound on the transaction date.
    pub date_gte: Option<Date>,
    /// Exclusive lower bound on the transaction date.
    pub date_gt: Option<Date>,
    /// Exclusive upper bound on the transaction date.
    pub date_lt: Option<Date>,
    /// Inclusive upper bound on the transaction date.
    pub date_lte: Option<Date>,
    /// The inclusive window a named date range resolved to.
    pub date_range: Option<(Date, Date)>,
}

impl TransactionFilter {
    /// Parse raw query parameters into a filter.
    ///
    /// `today` anchors the named date ranges and should already be resolved
    /// to the server's configured timezone.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every unparsable parameter.
    pub fn from_params(params: TransactionListParams, today: Date) -> Result<Self, Error> {
        let mut errors = ValidationErrors::new();
        let mut filter = TransactionFilter::default();

        if let Some(raw) = &params.paid {
            filter.paid = parse_bool(&mut errors, "paid", raw);
        }
        if let Some(raw) = &params.category {
            filter.category_id = parse_id(&mut errors, "category", raw);
        }
        if let Some(raw) = &params.account {
            filter.account_id = parse_id(&mut errors, "account", raw);
        }
        if let Some(raw) = &params.date_gte {
            filter.date_gte = parse_date(&mut errors, "date_gte", raw);
        }
        if let Some(raw) = &params.date_gt {
            filter.date_gt = parse_date(&mut errors, "date_gt", raw);
        }
        if let Some(raw) = &params.date_lt {
            filter.date_lt = parse_date(&mut errors, "date_lt", raw);
        }
        if let Some(raw) = &params.date_lte {
            filter.date_lte = parse_date(&mut errors, "date_lte", raw);
        }
        if let Some(raw) = &params.date_range {
            match resolve_date_range(raw, today) {
                Some(window) => filter.date_range = Some(window),
                None => errors.add("date_range", format!("\"{raw}\" is not a valid choice.")),
            }
        }

        errors.into_result()?;

        Ok(filter)
    }
}

fn parse_bool(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => {
            errors.add(field, "Enter a valid boolean value.");
            None
        }
    }
}

fn parse_id(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<DatabaseId> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(field, "Enter a number.");
            None
        }
    }
}

fn parse_date(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<Date> {
    match Date::parse(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Enter a valid date.");
            None
        }
    }
}

/// Resolve a named date range to an inclusive window anchored at `today`.
///
/// The supported names are `today`, `yesterday`, `week` (the past 7 days
/// including today), `month` (the current calendar month), and `year` (the
/// current calendar year).
fn resolve_date_range(name: &str, today: Date) -> Option<(Date, Date)> {
    match name {
        "today" => Some((today, today)),
        "yesterday" => {
            let yesterday = today - Duration::days(1);
            Some((yesterday, yesterday))
        }
        "week" => Some((today - Duration::days(6), today)),
        "month" => {
            let first = today - Duration::days(i64::from(today.day()) - 1);
            let length = time::util::days_in_year_month(today.year(), today.month());
            let last = first + Duration::days(i64::from(length) - 1);
            Some((first, last))
        }
        "year" => {
            let first = today - Duration::days(i64::from(today.ordinal()) - 1);
            let last = first + Duration::days(i64::from(time::util::days_in_year(today.year())) - 1);
            Some((first, last))
        }
        _ => None,
    }
}
