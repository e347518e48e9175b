//! Picker snapshots and change events.

use crate::countries::Country;
use crate::formatter::FormattedOutput;
use crate::types::RawInput;

/// Everything the number field needs to render, recomputed on each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    pub(crate) country: Country,
    pub(crate) raw_input: RawInput,
    pub(crate) is_valid: bool,
    pub(crate) formatted: FormattedOutput,
    pub(crate) show_error_enabled: bool,
}

impl PickerState {
    /// Currently selected country.
    pub fn country(&self) -> &Country {
        &self.country
    }

    /// Digits typed so far.
    pub fn raw_input(&self) -> &RawInput {
        &self.raw_input
    }

    /// Whether the digits form a valid number for the selected country.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Display string and cursor mapping for the field.
    pub fn formatted(&self) -> &FormattedOutput {
        &self.formatted
    }

    /// E.164 form of the input (`+<dial code><digits>`), or `None` when
    /// nothing has been typed.
    pub fn full_number(&self) -> Option<String> {
        (!self.raw_input.is_empty())
            .then(|| format!("+{}{}", self.country.dial_code(), self.raw_input))
    }

    /// Whether the field should show an error: invalid, non-empty input,
    /// and errors enabled in the config.
    pub fn show_error(&self) -> bool {
        self.show_error_enabled && !self.is_valid && !self.raw_input.is_empty()
    }
}

/// Change notification delivered to picker listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// A country was selected; validation and formatting were recomputed
    /// against the current input.
    CountrySelected(PickerState),
    /// The input changed; validation and formatting were recomputed
    /// against the current country.
    InputChanged(PickerState),
}

impl PickerEvent {
    /// State after the change.
    pub fn state(&self) -> &PickerState {
        match self {
            PickerEvent::CountrySelected(state) | PickerEvent::InputChanged(state) => state,
        }
    }
}
