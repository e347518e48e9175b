//! Error types for country lookups.

use thiserror::Error;

/// Errors returned by country table lookups.
///
/// Lookups never substitute a different country: an unknown key is always
/// reported back so the caller can decide on a fallback.
///
/// # Examples
///
/// ```rust
/// use country_code_picker::{CountryError, CountryTable};
///
/// let table = CountryTable::global();
/// match table.find_by_iso("ZZ") {
///     Err(CountryError::UnknownIso { code }) => assert_eq!(code, "ZZ"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountryError {
    /// No country with this ISO code in the table.
    #[error("Unknown country for ISO code '{code}'")]
    UnknownIso { code: String },

    /// No country with this dial code in the table.
    #[error("Unknown country for dial code '+{dial_code}'")]
    UnknownDialCode { dial_code: String },

    /// A custom table was requested but none of its codes matched.
    #[error("Country table is empty")]
    EmptyTable,
}
