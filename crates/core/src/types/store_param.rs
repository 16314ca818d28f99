//! The `storeId` navigation parameter.
//!
//! Both detail screens are addressed as `?storeId=<n>`. A missing or
//! malformed value is a user-visible error, reported before any data is
//! requested.

use crate::StoreId;

/// Errors that can occur when reading the `storeId` parameter.
///
/// The messages are shown verbatim on the error page.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreIdError {
    /// The parameter is absent or empty.
    #[error("No se proporcionó un ID de tienda válido.")]
    Missing,
    /// The parameter is present but not an integer.
    #[error("ID de tienda inválido")]
    Invalid,
}

/// Parse the raw `storeId` query value.
///
/// Surrounding whitespace is ignored; anything else that is not a plain
/// base-10 `i32` is rejected.
///
/// ```
/// use karam_core::{StoreId, StoreIdError, parse_store_id};
///
/// assert_eq!(parse_store_id(Some("12")), Ok(StoreId::new(12)));
/// assert_eq!(parse_store_id(Some("abc")), Err(StoreIdError::Invalid));
/// assert_eq!(parse_store_id(None), Err(StoreIdError::Missing));
/// ```
///
/// # Errors
///
/// Returns [`StoreIdError::Missing`] for an absent or blank value and
/// [`StoreIdError::Invalid`] when the value does not parse as an integer.
pub fn parse_store_id(raw: Option<&str>) -> Result<StoreId, StoreIdError> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(StoreIdError::Missing);
    }

    value
        .parse::<i32>()
        .map(StoreId::new)
        .map_err(|_| StoreIdError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_store_id(Some("1")), Ok(StoreId::new(1)));
        assert_eq!(parse_store_id(Some(" 25 ")), Ok(StoreId::new(25)));
    }

    #[test]
    fn test_parse_missing() {
        assert_eq!(parse_store_id(None), Err(StoreIdError::Missing));
        assert_eq!(parse_store_id(Some("")), Err(StoreIdError::Missing));
        assert_eq!(parse_store_id(Some("   ")), Err(StoreIdError::Missing));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_store_id(Some("abc")), Err(StoreIdError::Invalid));
        assert_eq!(parse_store_id(Some("12abc")), Err(StoreIdError::Invalid));
        assert_eq!(parse_store_id(Some("1.5")), Err(StoreIdError::Invalid));
        assert_eq!(
            parse_store_id(Some("99999999999")),
            Err(StoreIdError::Invalid)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(StoreIdError::Invalid.to_string(), "ID de tienda inválido");
        assert_eq!(
            StoreIdError::Missing.to_string(),
            "No se proporcionó un ID de tienda válido."
        );
    }
}
