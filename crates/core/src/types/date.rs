//! Calendar dates as typed in forms.
//!
//! HTML date inputs submit `YYYY-MM-DD`. Dates are parsed once, at the form
//! boundary, so everything past it works with `NaiveDate` and never has to
//! order an unparseable value.

use core::cmp::Ordering;

use chrono::NaiveDate;

/// The wire format of `<input type="date">`.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur when parsing a form date.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The field was left empty.
    #[error("date cannot be empty")]
    Empty,
    /// The field does not hold a `YYYY-MM-DD` calendar date.
    #[error("invalid date: {0}")]
    Malformed(String),
}

/// Parse a `YYYY-MM-DD` form value.
///
/// # Errors
///
/// Returns [`DateError::Empty`] for a blank value and
/// [`DateError::Malformed`] when the value is not a real calendar date.
pub fn parse_form_date(raw: &str) -> Result<NaiveDate, DateError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DateError::Empty);
    }
    NaiveDate::parse_from_str(value, FORM_DATE_FORMAT)
        .map_err(|_| DateError::Malformed(value.to_owned()))
}

/// Comparator for descending calendar order.
///
/// Meant for `sort_by`, which is stable: rows sharing a date keep their
/// original relative order.
#[must_use]
pub fn newest_first(a: &NaiveDate, b: &NaiveDate) -> Ordering {
    b.cmp(a)
}
