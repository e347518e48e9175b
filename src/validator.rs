//! Phone number validity against a country's dial code.

use crate::phone::{LibPhoneNumberService, PhoneNumberService};
use crate::types::{DialCode, RawInput};

/// Validates typed digits against a dial code through a [`PhoneNumberService`].
///
/// Validation never fails: malformed, empty or too-short input is simply
/// invalid.
///
/// # Example
///
/// ```rust
/// use country_code_picker::{DialCode, LibPhoneNumberService, Validator};
///
/// let validator = Validator::new(LibPhoneNumberService::shared());
/// let india = DialCode::new("91").unwrap();
/// assert!(validator.is_valid("98765 43210", &india));
/// assert!(!validator.is_valid("123", &india));
/// ```
#[derive(Debug, Clone)]
pub struct Validator<S> {
    service: S,
}

impl<S: PhoneNumberService> Validator<S> {
    /// Create a validator over the given phone metadata service.
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Get reference to the underlying service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Whether `input` (non-digits are ignored) forms a valid number once
    /// prefixed with `dial_code`.
    pub fn is_valid(&self, input: &str, dial_code: &DialCode) -> bool {
        self.is_valid_raw(&RawInput::new(input), dial_code)
    }

    /// Same as [`Validator::is_valid`] for already-stripped digits.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ccp.validate",
            level = "trace",
            skip_all,
            fields(dial_code = %dial_code, digits = raw.len())
        )
    )]
    pub fn is_valid_raw(&self, raw: &RawInput, dial_code: &DialCode) -> bool {
        if raw.is_empty() {
            return false;
        }
        let candidate = e164_candidate(dial_code, raw);
        self.service.is_possible_or_valid_number(&candidate)
    }
}

impl Default for Validator<&'static LibPhoneNumberService> {
    fn default() -> Self {
        Self::new(LibPhoneNumberService::shared())
    }
}

/// `+<dial code><digits>` with no separators.
pub fn e164_candidate(dial_code: &DialCode, raw: &RawInput) -> String {
    format!("+{}{}", dial_code, raw)
}

/// Validate against a dial code string using the shared libphonenumber service.
///
/// An unparsable dial code makes every input invalid.
///
/// ```rust
/// use country_code_picker::is_valid;
///
/// assert!(is_valid("2025550123", "1"));
/// assert!(!is_valid("0000000000", "+1"));
/// assert!(!is_valid("", "91"));
/// ```
pub fn is_valid(input: &str, dial_code: &str) -> bool {
    let Ok(dial_code) = DialCode::new(dial_code) else {
        return false;
    };
    Validator::new(LibPhoneNumberService::shared()).is_valid(input, &dial_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IsoCode;
    use std::sync::Mutex;

    /// Records every candidate it is asked about.
    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<String>>,
    }

    impl PhoneNumberService for Recording {
        fn is_possible_or_valid_number(&self, e164_candidate: &str) -> bool {
            self.seen.lock().unwrap().push(e164_candidate.to_string());
            e164_candidate.len() > 5
        }

        fn as_you_type_format(&self, digits: &str, _region: IsoCode) -> String {
            digits.to_string()
        }
    }

    #[test]
    fn test_candidate_is_e164_like() {
        let service = Recording::default();
        let validator = Validator::new(&service);
        let dial_code = DialCode::new("+44").unwrap();

        assert!(validator.is_valid("(020) 7946-0958", &dial_code));
        assert_eq!(service.seen.lock().unwrap().as_slice(), ["+4402079460958"]);
    }

    #[test]
    fn test_empty_input_skips_service() {
        let service = Recording::default();
        let validator = Validator::new(&service);
        let dial_code = DialCode::new("1").unwrap();

        assert!(!validator.is_valid("", &dial_code));
        assert!(!validator.is_valid(" - ", &dial_code));
        assert!(service.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_examples() {
        assert!(is_valid("9876543210", "91"));
        assert!(!is_valid("123", "91"));
        assert!(is_valid("2025550123", "1"));
        assert!(!is_valid("0000000000", "1"));
    }

    #[test]
    fn test_bad_dial_code() {
        assert!(!is_valid("9876543210", ""));
        assert!(!is_valid("9876543210", "9x"));
    }
}
