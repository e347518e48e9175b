//! Core value types shared by the country table, validator and formatter.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// IsoCode
// =============================================================================

/// Error when parsing an ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsoCodeError {
    /// Code is not exactly two characters long.
    #[error("ISO code must be exactly 2 letters, got {len}")]
    InvalidLength { len: usize },
    /// Code contains a non-letter character.
    #[error("ISO code must contain only ASCII letters")]
    NonLetter,
}

/// Two-letter country identifier (e.g., "US", "IN").
///
/// Always stored uppercase, so `"us"` and `"US"` compare equal once parsed.
///
/// # Example
///
/// ```rust
/// use country_code_picker::IsoCode;
///
/// let iso = IsoCode::new(" in ").unwrap();
/// assert_eq!(iso.as_str(), "IN");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoCode([u8; 2]);

impl IsoCode {
    /// Create a new IsoCode, trimming whitespace and uppercasing.
    pub fn new(s: impl AsRef<str>) -> Result<Self, IsoCodeError> {
        let s = s.as_ref().trim();
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(IsoCodeError::InvalidLength {
                len: s.chars().count(),
            });
        }
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(IsoCodeError::NonLetter);
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
        ]))
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Both bytes are validated ASCII letters.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Regional-indicator flag for this code.
    pub fn flag(&self) -> String {
        crate::countries::flag_glyph(self.as_str())
    }
}

impl FromStr for IsoCode {
    type Err = IsoCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for IsoCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for IsoCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<'de> Deserialize<'de> for IsoCode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        IsoCode::new(raw).map_err(de::Error::custom)
    }
}

impl Serialize for IsoCode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

// =============================================================================
// DialCode
// =============================================================================

/// Error when parsing a dial code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialCodeError {
    /// Dial code contains non-digit characters.
    #[error("dial code must contain only digits")]
    NonDigit,
    /// Dial code is empty.
    #[error("dial code cannot be empty")]
    Empty,
}

/// Country dial code (e.g., "1" for USA, "91" for India).
///
/// Dial codes are stored without the leading '+' sign.
///
/// # Example
///
/// ```rust
/// use country_code_picker::DialCode;
///
/// let dc = DialCode::new("+91").unwrap();
/// assert_eq!(dc.to_string(), "91");
/// assert_eq!(dc.with_plus(), "+91");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DialCode(String);

impl DialCode {
    /// Create a new DialCode from a string.
    ///
    /// The input can include a leading '+' which will be stripped.
    pub fn new(s: impl AsRef<str>) -> Result<Self, DialCodeError> {
        let n = s.as_ref().trim().trim_start_matches('+');
        if n.is_empty() {
            return Err(DialCodeError::Empty);
        }
        if !n.chars().all(|c| c.is_ascii_digit()) {
            return Err(DialCodeError::NonDigit);
        }
        Ok(Self(n.to_string()))
    }

    /// Get the dial code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dial code with the international '+' prefix (e.g., "+91").
    pub fn with_plus(&self) -> String {
        format!("+{}", self.0)
    }
}

impl FromStr for DialCode {
    type Err = DialCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for DialCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DialCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for DialCode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        DialCode::new(raw).map_err(de::Error::custom)
    }
}

impl Serialize for DialCode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

// =============================================================================
// RawInput
// =============================================================================

/// Digits the user has typed into the number field.
///
/// Construction strips every non-digit character, so a `RawInput` never
/// holds separators, spaces or a leading '+'.
///
/// # Example
///
/// ```rust
/// use country_code_picker::RawInput;
///
/// let raw = RawInput::new("(202) 555-0123");
/// assert_eq!(raw.as_str(), "2025550123");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RawInput(String);

impl RawInput {
    /// Create a new RawInput, keeping only ASCII digits.
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().chars().filter(char::is_ascii_digit).collect())
    }

    /// Get the digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no digits were typed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for RawInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RawInput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for RawInput {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for RawInput {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<RawInput> for String {
    fn from(raw: RawInput) -> Self {
        raw.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // IsoCode tests
    #[test]
    fn test_iso_code_uppercases() {
        let iso = IsoCode::new("us").unwrap();
        assert_eq!(iso.as_str(), "US");
        assert_eq!(iso, IsoCode::new("US").unwrap());
    }

    #[test]
    fn test_iso_code_trim() {
        assert_eq!(IsoCode::new("  gb ").unwrap().as_str(), "GB");
    }

    #[test]
    fn test_iso_code_invalid_length() {
        assert!(matches!(
            IsoCode::new("USA"),
            Err(IsoCodeError::InvalidLength { len: 3 })
        ));
        assert!(matches!(
            IsoCode::new(""),
            Err(IsoCodeError::InvalidLength { len: 0 })
        ));
    }

    #[test]
    fn test_iso_code_non_letter() {
        assert!(matches!(IsoCode::new("1A"), Err(IsoCodeError::NonLetter)));
    }

    #[test]
    fn test_iso_code_multibyte_rejected() {
        assert!(IsoCode::new("é").is_err());
    }

    #[test]
    fn test_iso_code_serde() {
        let iso: IsoCode = serde_json::from_str(r#""in""#).unwrap();
        assert_eq!(iso.as_str(), "IN");
        assert_eq!(serde_json::to_string(&iso).unwrap(), r#""IN""#);
    }

    // DialCode tests
    #[test]
    fn test_dial_code_with_plus() {
        let dc = DialCode::new("+380").unwrap();
        assert_eq!(dc.as_str(), "380");
        assert_eq!(dc.with_plus(), "+380");
    }

    #[test]
    fn test_dial_code_trim() {
        let dc = DialCode::new("  +7  ").unwrap();
        assert_eq!(dc.as_str(), "7");
    }

    #[test]
    fn test_dial_code_empty() {
        assert!(matches!(DialCode::new(""), Err(DialCodeError::Empty)));
        assert!(matches!(DialCode::new("+"), Err(DialCodeError::Empty)));
    }

    #[test]
    fn test_dial_code_non_digit() {
        assert!(matches!(DialCode::new("12a"), Err(DialCodeError::NonDigit)));
    }

    #[test]
    fn test_dial_code_serde() {
        let dc: DialCode = serde_json::from_str(r#""+91""#).unwrap();
        assert_eq!(dc.as_str(), "91");
        assert_eq!(serde_json::to_string(&dc).unwrap(), r#""91""#);
    }

    // RawInput tests
    #[test]
    fn test_raw_input_strips_non_digits() {
        assert_eq!(RawInput::new("+1 (202) 555-0123").as_str(), "12025550123");
        assert_eq!(RawInput::new("abc").as_str(), "");
        assert!(RawInput::new("--").is_empty());
    }

    #[test]
    fn test_raw_input_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not ASCII digits.
        assert_eq!(RawInput::new("١٢٣45").as_str(), "45");
    }

    #[test]
    fn test_raw_input_serde_strips() {
        let raw: RawInput = serde_json::from_str(r#""98 76-54""#).unwrap();
        assert_eq!(raw.as_str(), "987654");
    }
}
