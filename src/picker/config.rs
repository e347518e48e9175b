//! Picker configuration types.

use crate::types::IsoCode;

/// Configuration for the [`PickerController`](crate::PickerController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    /// Country selected at start. Takes precedence over detection.
    pub default_country: Option<IsoCode>,
    /// Restrict the picker to these countries, in this order.
    pub countries: Option<Vec<IsoCode>>,
    /// Try to detect the device's country when no default is set.
    pub detect_country: bool,
    /// Whether invalid, non-empty input should be flagged as an error.
    pub show_error: bool,
    /// Digits already in the field at start.
    pub initial_input: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            default_country: None,
            countries: None,
            detect_country: true,
            show_error: true,
            initial_input: String::new(),
        }
    }
}

impl PickerConfig {
    /// Create a new builder for PickerConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use country_code_picker::{IsoCode, PickerConfig};
    ///
    /// let config = PickerConfig::builder()
    ///     .default_country(IsoCode::new("IN").unwrap())
    ///     .show_error(false)
    ///     .build();
    ///
    /// assert_eq!(config.default_country.unwrap().as_str(), "IN");
    /// assert!(!config.show_error);
    /// ```
    pub fn builder() -> PickerConfigBuilder {
        PickerConfigBuilder::default()
    }

    /// Create a new config with a default country.
    pub fn with_default_country(mut self, iso: IsoCode) -> Self {
        self.default_country = Some(iso);
        self
    }

    /// Create a new config with country detection switched on or off.
    pub fn with_detect_country(mut self, detect: bool) -> Self {
        self.detect_country = detect;
        self
    }
}

/// Builder for PickerConfig.
///
/// Provides a fluent API for configuring the picker.
#[derive(Debug, Clone)]
pub struct PickerConfigBuilder {
    pub(crate) default_country: Option<IsoCode>,
    pub(crate) countries: Option<Vec<IsoCode>>,
    pub(crate) detect_country: bool,
    pub(crate) show_error: bool,
    pub(crate) initial_input: String,
}

impl Default for PickerConfigBuilder {
    fn default() -> Self {
        let config = PickerConfig::default();
        Self {
            default_country: config.default_country,
            countries: config.countries,
            detect_country: config.detect_country,
            show_error: config.show_error,
            initial_input: config.initial_input,
        }
    }
}

impl PickerConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the country selected at start.
    ///
    /// Default: none (detect, then the table's first entry)
    pub fn default_country(mut self, iso: IsoCode) -> Self {
        self.default_country = Some(iso);
        self
    }

    /// Restrict the picker to these countries.
    ///
    /// Default: every country of the embedded table
    pub fn countries(mut self, countries: impl IntoIterator<Item = IsoCode>) -> Self {
        self.countries = Some(countries.into_iter().collect());
        self
    }

    /// Switch device country detection on or off.
    ///
    /// Default: true
    pub fn detect_country(mut self, detect: bool) -> Self {
        self.detect_country = detect;
        self
    }

    /// Flag invalid, non-empty input as an error.
    ///
    /// Default: true
    pub fn show_error(mut self, show: bool) -> Self {
        self.show_error = show;
        self
    }

    /// Set the text already in the field at start.
    ///
    /// Default: empty
    pub fn initial_input(mut self, input: impl Into<String>) -> Self {
        self.initial_input = input.into();
        self
    }

    /// Build the PickerConfig.
    pub fn build(self) -> PickerConfig {
        PickerConfig {
            default_country: self.default_country,
            countries: self.countries,
            detect_country: self.detect_country,
            show_error: self.show_error,
            initial_input: self.initial_input,
        }
    }
}

impl From<PickerConfig> for PickerConfigBuilder {
    fn from(config: PickerConfig) -> Self {
        Self {
            default_country: config.default_country,
            countries: config.countries,
            detect_country: config.detect_country,
            show_error: config.show_error,
            initial_input: config.initial_input,
        }
    }
}
