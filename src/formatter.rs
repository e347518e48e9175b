//! Visual transformation of typed digits into a formatted display string.

use crate::phone::{LibPhoneNumberService, PhoneNumberService};
use crate::types::{IsoCode, RawInput};

// =============================================================================
// OffsetMapping
// =============================================================================

/// Maps cursor positions between the raw digits and the display string.
///
/// Positions are counted in characters. Both directions accept the end
/// position (one past the last character) and clamp anything beyond it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMapping {
    /// `to_display[i]` is the display position of raw digit `i`;
    /// the last entry is the display length.
    to_display: Vec<usize>,
    /// `to_raw[j]` is the number of digits before display position `j`.
    to_raw: Vec<usize>,
}

impl OffsetMapping {
    fn build(display: &str, digit_count: usize) -> Self {
        let mut to_display = Vec::with_capacity(digit_count + 1);
        let mut to_raw = Vec::with_capacity(display.len() + 1);
        let mut digits_seen = 0;

        for (pos, c) in display.chars().enumerate() {
            to_raw.push(digits_seen);
            if c.is_ascii_digit() {
                to_display.push(pos);
                digits_seen += 1;
            }
        }
        to_raw.push(digits_seen);
        to_display.push(to_raw.len() - 1);

        Self { to_display, to_raw }
    }

    /// Display position for a raw digit offset.
    pub fn original_to_transformed(&self, offset: usize) -> usize {
        self.to_display[offset.min(self.to_display.len() - 1)]
    }

    /// Raw digit offset for a display position.
    pub fn transformed_to_original(&self, offset: usize) -> usize {
        self.to_raw[offset.min(self.to_raw.len() - 1)]
    }
}

// =============================================================================
// FormattedOutput
// =============================================================================

/// Display string for the number field plus its cursor mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedOutput {
    display: String,
    mapping: OffsetMapping,
}

impl FormattedOutput {
    fn new(display: String, digit_count: usize) -> Self {
        let mapping = OffsetMapping::build(&display, digit_count);
        Self { display, mapping }
    }

    /// Digits shown as-is, one-to-one mapping.
    fn identity(raw: &RawInput) -> Self {
        Self::new(raw.as_str().to_string(), raw.len())
    }

    /// Formatted string to show in the text field.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Cursor mapping between raw digits and [`FormattedOutput::display`].
    pub fn mapping(&self) -> &OffsetMapping {
        &self.mapping
    }

    /// Shortcut for [`OffsetMapping::original_to_transformed`].
    pub fn original_to_transformed(&self, offset: usize) -> usize {
        self.mapping.original_to_transformed(offset)
    }

    /// Shortcut for [`OffsetMapping::transformed_to_original`].
    pub fn transformed_to_original(&self, offset: usize) -> usize {
        self.mapping.transformed_to_original(offset)
    }
}

// =============================================================================
// PhoneFormatter
// =============================================================================

/// Formats typed digits for a region through a [`PhoneNumberService`].
///
/// The output depends only on the digits and the region: the service's
/// as-you-type state is replayed from scratch on every call.
///
/// # Example
///
/// ```rust
/// use country_code_picker::{IsoCode, LibPhoneNumberService, PhoneFormatter};
///
/// let formatter = PhoneFormatter::new(LibPhoneNumberService::shared());
/// let us = IsoCode::new("US").unwrap();
/// let out = formatter.format_for("2025550123", us);
/// assert_eq!(out.display(), "(202) 555-0123");
/// assert_eq!(out.original_to_transformed(3), 6);
/// ```
#[derive(Debug, Clone)]
pub struct PhoneFormatter<S> {
    service: S,
}

impl<S: PhoneNumberService> PhoneFormatter<S> {
    /// Create a formatter over the given phone metadata service.
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Format `input` (non-digits are ignored) for an ISO code string.
    ///
    /// An unparsable ISO code leaves the digits unformatted.
    pub fn format(&self, input: &str, iso: &str) -> FormattedOutput {
        let raw = RawInput::new(input);
        match IsoCode::new(iso) {
            Ok(region) => self.format_raw(&raw, region),
            Err(_) => FormattedOutput::identity(&raw),
        }
    }

    /// Format `input` (non-digits are ignored) for a region.
    pub fn format_for(&self, input: &str, region: IsoCode) -> FormattedOutput {
        self.format_raw(&RawInput::new(input), region)
    }

    /// Format already-stripped digits for a region.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ccp.format",
            level = "trace",
            skip_all,
            fields(region = %region, digits = raw.len())
        )
    )]
    pub fn format_raw(&self, raw: &RawInput, region: IsoCode) -> FormattedOutput {
        if raw.is_empty() {
            return FormattedOutput::identity(raw);
        }

        let display = self.service.as_you_type_format(raw.as_str(), region);

        // Separators only: anything that changes the digits is discarded.
        if !display
            .chars()
            .filter(char::is_ascii_digit)
            .eq(raw.as_str().chars())
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(region = %region, "Formatter changed digits, showing them unformatted");
            return FormattedOutput::identity(raw);
        }

        FormattedOutput::new(display, raw.len())
    }
}

impl Default for PhoneFormatter<&'static LibPhoneNumberService> {
    fn default() -> Self {
        Self::new(LibPhoneNumberService::shared())
    }
}

/// Format digits for an ISO code using the shared libphonenumber service.
///
/// ```rust
/// use country_code_picker::format;
///
/// let out = format("9876543210", "in");
/// let digits: String = out.display().chars().filter(char::is_ascii_digit).collect();
/// assert_eq!(digits, "9876543210");
/// ```
pub fn format(input: &str, iso: &str) -> FormattedOutput {
    PhoneFormatter::new(LibPhoneNumberService::shared()).format(input, iso)
}
