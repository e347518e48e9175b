//! Phone number service trait definition.

use crate::types::IsoCode;
use std::sync::Arc;

/// Region-aware phone metadata used by the validator and formatter.
///
/// The default implementation is [`LibPhoneNumberService`](crate::LibPhoneNumberService),
/// backed by libphonenumber metadata. Tests and embedders can plug in a
/// deterministic implementation instead of the full metadata set.
///
/// Both methods must be total: malformed input yields `false` or the
/// digits unchanged, never a panic.
///
/// # Example
///
/// ```rust
/// use country_code_picker::{IsoCode, PhoneNumberService};
///
/// struct TenDigits;
///
/// impl PhoneNumberService for TenDigits {
///     fn is_possible_or_valid_number(&self, e164_candidate: &str) -> bool {
///         e164_candidate.len() == 13
///     }
///
///     fn as_you_type_format(&self, digits: &str, _region: IsoCode) -> String {
///         digits.to_string()
///     }
/// }
///
/// assert!(TenDigits.is_possible_or_valid_number("+919876543210"));
/// ```
pub trait PhoneNumberService: Send + Sync {
    /// Whether an E.164-like candidate (`+<dial code><digits>`) is a valid
    /// number for the region its dial code belongs to.
    fn is_possible_or_valid_number(&self, e164_candidate: &str) -> bool;

    /// Format national digits as they would appear while typing in `region`.
    ///
    /// The result must contain exactly the input digits in the same order,
    /// with only separators inserted.
    fn as_you_type_format(&self, digits: &str, region: IsoCode) -> String;
}

impl<T: PhoneNumberService + ?Sized> PhoneNumberService for &T {
    fn is_possible_or_valid_number(&self, e164_candidate: &str) -> bool {
        (**self).is_possible_or_valid_number(e164_candidate)
    }

    fn as_you_type_format(&self, digits: &str, region: IsoCode) -> String {
        (**self).as_you_type_format(digits, region)
    }
}

impl<T: PhoneNumberService + ?Sized> PhoneNumberService for Arc<T> {
    fn is_possible_or_valid_number(&self, e164_candidate: &str) -> bool {
        (**self).is_possible_or_valid_number(e164_candidate)
    }

    fn as_you_type_format(&self, digits: &str, region: IsoCode) -> String {
        (**self).as_you_type_format(digits, region)
    }
}
