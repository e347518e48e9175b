//! Main controller implementation.

use super::config::{PickerConfig, PickerConfigBuilder};
use super::state::{PickerEvent, PickerState};
use super::traits::PickerListener;
use crate::countries::{Country, CountryTable};
use crate::errors::CountryError;
use crate::formatter::PhoneFormatter;
use crate::locale::{RegionSource, SystemRegionSource, resolve_in};
use crate::phone::{LibPhoneNumberService, PhoneNumberService};
use crate::types::{IsoCode, RawInput};
use crate::validator::Validator;
use std::fmt::{self, Debug, Formatter};

#[cfg(feature = "tracing")]
use tracing::debug;

/// Handle returned by [`PickerController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Holds the selected country and the typed digits for one picker widget.
///
/// Every change replaces the [`PickerState`] snapshot with a freshly
/// computed one and then notifies listeners in subscription order. There
/// is no locking: the controller is meant to live on the UI thread.
///
/// # Type Parameters
///
/// - `S`: phone metadata service, the shared libphonenumber one by default
///
/// # Example
///
/// ```rust
/// use country_code_picker::{IsoCode, LibPhoneNumberService, PickerController};
///
/// let mut picker = PickerController::builder(LibPhoneNumberService::shared())
///     .default_country(IsoCode::new("IN").unwrap())
///     .build()
///     .unwrap();
///
/// picker.set_input("98765 43210");
/// assert!(picker.state().is_valid());
/// assert_eq!(picker.state().full_number().as_deref(), Some("+919876543210"));
///
/// // Ten digits are too many for Singapore.
/// picker.select_iso("sg").unwrap();
/// assert!(!picker.state().is_valid());
/// ```
pub struct PickerController<S: PhoneNumberService = &'static LibPhoneNumberService> {
    service: S,
    table: CountryTable,
    show_error: bool,
    state: PickerState,
    sheet_open: bool,
    listeners: Vec<(SubscriptionId, Box<dyn PickerListener>)>,
    next_subscription: u64,
}

impl PickerController {
    /// Create a controller over the shared libphonenumber service.
    ///
    /// Country detection, when enabled, reads the system locale.
    pub fn new(config: PickerConfig) -> Result<Self, CountryError> {
        Self::builder(LibPhoneNumberService::shared())
            .config(config)
            .build()
    }
}

impl<S: PhoneNumberService> PickerController<S> {
    /// Create a new builder for PickerController.
    pub fn builder(service: S) -> PickerControllerBuilder<S> {
        PickerControllerBuilder::new(service)
    }

    fn compute(&self, country: Country, raw_input: RawInput) -> PickerState {
        Self::compute_with(&self.service, self.show_error, country, raw_input)
    }

    fn compute_with(
        service: &S,
        show_error: bool,
        country: Country,
        raw_input: RawInput,
    ) -> PickerState {
        let is_valid = Validator::new(service).is_valid_raw(&raw_input, country.dial_code());
        let formatted = PhoneFormatter::new(service).format_raw(&raw_input, country.iso_code());
        PickerState {
            country,
            raw_input,
            is_valid,
            formatted,
            show_error_enabled: show_error,
        }
    }

    fn notify(&mut self, event: PickerEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_event(&event);
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &PickerState {
        &self.state
    }

    /// Currently selected country.
    pub fn selected_country(&self) -> &Country {
        &self.state.country
    }

    /// Countries offered by this picker.
    pub fn table(&self) -> &CountryTable {
        &self.table
    }

    /// Get reference to the underlying phone service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Select a country and recompute against the current input.
    ///
    /// The country must be one this picker offers. Others are rejected with
    /// [`CountryError::UnknownIso`] and the selection is left untouched.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ccp.select_country",
            level = "debug",
            skip_all,
            fields(country = %country.iso_code())
        )
    )]
    pub fn select_country(&mut self, country: &Country) -> Result<&PickerState, CountryError> {
        let country = self.table.find_by_iso(country.iso_code().as_str())?.clone();
        Ok(self.apply_country(country))
    }

    /// Select a country of this picker's table by ISO code.
    ///
    /// An unknown code leaves the selection untouched.
    pub fn select_iso(&mut self, code: &str) -> Result<&PickerState, CountryError> {
        let country = self.table.find_by_iso(code)?.clone();
        Ok(self.apply_country(country))
    }

    fn apply_country(&mut self, country: Country) -> &PickerState {
        let state = self.compute(country, self.state.raw_input.clone());
        self.state = state;
        self.sheet_open = false;

        #[cfg(feature = "tracing")]
        debug!(is_valid = self.state.is_valid, "Country selected");

        self.notify(PickerEvent::CountrySelected(self.state.clone()));
        &self.state
    }

    /// Replace the typed text and recompute against the current country.
    ///
    /// Non-digit characters are dropped.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "ccp.set_input", level = "debug", skip_all)
    )]
    pub fn set_input(&mut self, text: &str) -> &PickerState {
        let state = self.compute(self.state.country.clone(), RawInput::new(text));
        self.state = state;

        #[cfg(feature = "tracing")]
        debug!(
            digits = self.state.raw_input.len(),
            is_valid = self.state.is_valid,
            "Input changed"
        );

        self.notify(PickerEvent::InputChanged(self.state.clone()));
        &self.state
    }

    /// Clear the typed text.
    pub fn clear_input(&mut self) -> &PickerState {
        self.set_input("")
    }

    /// Open the country selection sheet.
    pub fn open_sheet(&mut self) {
        self.sheet_open = true;
    }

    /// Close the country selection sheet without selecting.
    pub fn close_sheet(&mut self) {
        self.sheet_open = false;
    }

    /// Whether the country selection sheet is showing.
    pub fn is_sheet_open(&self) -> bool {
        self.sheet_open
    }

    /// Countries matching the sheet's search box.
    pub fn search(&self, query: &str) -> Vec<&Country> {
        self.table.search(query)
    }

    /// Register a listener, called after every change.
    pub fn subscribe<L: PickerListener + 'static>(&mut self, listener: L) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }
}

impl<S: PhoneNumberService> Debug for PickerController<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerController")
            .field("state", &self.state)
            .field("countries", &self.table.len())
            .field("sheet_open", &self.sheet_open)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Builder for PickerController.
///
/// Provides a fluent API for constructing a picker with a phone service,
/// configuration and a region source for country detection.
///
/// # Example
///
/// ```rust
/// use country_code_picker::{DeviceContext, LibPhoneNumberService, PickerController};
///
/// let picker = PickerController::builder(LibPhoneNumberService::shared())
///     .region_source(DeviceContext::new().with_network_region("DE"))
///     .build()
///     .unwrap();
///
/// assert_eq!(picker.selected_country().name(), "Germany");
/// ```
pub struct PickerControllerBuilder<S: PhoneNumberService> {
    service: S,
    config_builder: PickerConfigBuilder,
    region_source: Box<dyn RegionSource>,
}

impl<S: PhoneNumberService> PickerControllerBuilder<S> {
    /// Create a new builder with the given service.
    pub fn new(service: S) -> Self {
        Self {
            service,
            config_builder: PickerConfigBuilder::default(),
            region_source: Box::new(SystemRegionSource),
        }
    }

    /// Set the country selected at start.
    pub fn default_country(mut self, iso: IsoCode) -> Self {
        self.config_builder = self.config_builder.default_country(iso);
        self
    }

    /// Restrict the picker to these countries.
    pub fn countries(mut self, countries: impl IntoIterator<Item = IsoCode>) -> Self {
        self.config_builder = self.config_builder.countries(countries);
        self
    }

    /// Switch device country detection on or off.
    pub fn detect_country(mut self, detect: bool) -> Self {
        self.config_builder = self.config_builder.detect_country(detect);
        self
    }

    /// Flag invalid, non-empty input as an error.
    pub fn show_error(mut self, show: bool) -> Self {
        self.config_builder = self.config_builder.show_error(show);
        self
    }

    /// Set the text already in the field at start.
    pub fn initial_input(mut self, input: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.initial_input(input);
        self
    }

    /// Set the full configuration.
    pub fn config(mut self, config: PickerConfig) -> Self {
        self.config_builder = PickerConfigBuilder::from(config);
        self
    }

    /// Where to look for the device's country.
    ///
    /// Default: [`SystemRegionSource`]
    pub fn region_source(mut self, source: impl RegionSource + 'static) -> Self {
        self.region_source = Box::new(source);
        self
    }

    /// Build the PickerController.
    ///
    /// The initial country is the configured default, else the detected
    /// country (when detection is on), else the table's first entry. A
    /// default or country filter naming an unknown ISO code is an error.
    pub fn build(self) -> Result<PickerController<S>, CountryError> {
        let config = self.config_builder.build();

        let table = match &config.countries {
            Some(codes) => CountryTable::from_iso_codes(codes)?,
            None => CountryTable::default(),
        };

        let country = match config.default_country {
            Some(iso) => table.find_by_iso(iso.as_str())?.clone(),
            None if config.detect_country => resolve_in(&table, self.region_source.as_ref())
                .unwrap_or_else(|| table.first())
                .clone(),
            None => table.first().clone(),
        };

        #[cfg(feature = "tracing")]
        debug!(country = %country.iso_code(), countries = table.len(), "Picker initialized");

        let state = PickerController::compute_with(
            &self.service,
            config.show_error,
            country,
            RawInput::new(&config.initial_input),
        );

        Ok(PickerController {
            service: self.service,
            table,
            show_error: config.show_error,
            state,
            sheet_open: false,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::DeviceContext;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Valid when the national part has exactly ten digits; never formats.
    struct TenDigits;

    impl PhoneNumberService for TenDigits {
        fn is_possible_or_valid_number(&self, e164_candidate: &str) -> bool {
            e164_candidate
                .strip_prefix("+91")
                .or_else(|| e164_candidate.strip_prefix("+1"))
                .is_some_and(|national| national.len() == 10)
        }

        fn as_you_type_format(&self, digits: &str, _region: IsoCode) -> String {
            digits.to_string()
        }
    }

    fn iso(code: &str) -> IsoCode {
        IsoCode::new(code).unwrap()
    }

    fn picker() -> PickerController<TenDigits> {
        PickerController::builder(TenDigits)
            .default_country(iso("IN"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let picker = picker();
        assert_eq!(picker.selected_country().iso_code(), iso("IN"));
        assert!(picker.state().raw_input().is_empty());
        assert!(!picker.state().is_valid());
        assert!(!picker.state().show_error());
        assert_eq!(picker.state().full_number(), None);
    }

    #[test]
    fn test_input_recomputes_validity() {
        let mut picker = picker();
        assert!(!picker.set_input("98765").is_valid());
        assert!(picker.state().show_error());

        let state = picker.set_input("98765 43210");
        assert!(state.is_valid());
        assert_eq!(state.raw_input().as_str(), "9876543210");
        assert_eq!(state.full_number().as_deref(), Some("+919876543210"));
    }

    #[test]
    fn test_selection_recomputes_against_current_input() {
        let mut picker = picker();
        picker.set_input("9876543210");
        assert!(picker.state().is_valid());

        picker.select_iso("GB").unwrap();
        assert!(!picker.state().is_valid());
        assert_eq!(picker.state().raw_input().as_str(), "9876543210");

        picker.select_iso("us").unwrap();
        assert!(picker.state().is_valid());
    }

    #[test]
    fn test_select_unknown_iso_keeps_selection() {
        let mut picker = picker();
        assert!(matches!(
            picker.select_iso("ZZ"),
            Err(CountryError::UnknownIso { .. })
        ));
        assert_eq!(picker.selected_country().iso_code(), iso("IN"));
    }

    #[test]
    fn test_listeners_receive_events_in_order() {
        let mut picker = picker();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        picker.subscribe(move |event: &PickerEvent| {
            let kind = match event {
                PickerEvent::CountrySelected(_) => "country",
                PickerEvent::InputChanged(_) => "input",
            };
            sink.borrow_mut()
                .push((kind, event.state().country().iso_code(), event.state().is_valid()));
        });

        picker.set_input("2025550123");
        picker.select_iso("US").unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![("input", iso("IN"), true), ("country", iso("US"), true)]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut picker = picker();
        let count = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&count);
        let id = picker.subscribe(move |_: &PickerEvent| *sink.borrow_mut() += 1);

        picker.set_input("1");
        assert!(picker.unsubscribe(id));
        assert!(!picker.unsubscribe(id));
        picker.set_input("12");

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_sheet_closes_on_selection() {
        let mut picker = picker();
        picker.open_sheet();
        assert!(picker.is_sheet_open());

        let germany = picker.search("germany")[0].clone();
        picker.select_country(&germany).unwrap();
        assert!(!picker.is_sheet_open());
        assert_eq!(picker.selected_country().iso_code(), iso("DE"));

        picker.open_sheet();
        picker.close_sheet();
        assert!(!picker.is_sheet_open());
    }

    #[test]
    fn test_select_country_outside_table() {
        let mut picker = PickerController::builder(TenDigits)
            .countries([iso("US"), iso("IN")])
            .default_country(iso("IN"))
            .build()
            .unwrap();
        let events = Rc::new(RefCell::new(0));
        let seen = events.clone();
        picker.subscribe(move |_: &PickerEvent| *seen.borrow_mut() += 1);

        let germany = crate::countries::find_by_iso("DE").unwrap().clone();
        let err = picker.select_country(&germany).unwrap_err();
        assert!(matches!(err, CountryError::UnknownIso { .. }));
        assert_eq!(picker.selected_country().iso_code(), iso("IN"));
        assert_eq!(*events.borrow(), 0);

        let us = crate::countries::find_by_iso("us").unwrap().clone();
        picker.select_country(&us).unwrap();
        assert_eq!(picker.selected_country().iso_code(), iso("US"));
        assert_eq!(*events.borrow(), 1);
    }

    #[test]
    fn test_show_error_disabled() {
        let mut picker = PickerController::builder(TenDigits)
            .default_country(iso("IN"))
            .show_error(false)
            .build()
            .unwrap();
        picker.set_input("12");
        assert!(!picker.state().is_valid());
        assert!(!picker.state().show_error());
    }

    #[test]
    fn test_initial_country_detection() {
        let picker = PickerController::builder(TenDigits)
            .region_source(DeviceContext::new().with_sim_region("CA"))
            .build()
            .unwrap();
        assert_eq!(picker.selected_country().iso_code(), iso("CA"));
    }

    #[test]
    fn test_default_country_beats_detection() {
        let picker = PickerController::builder(TenDigits)
            .default_country(iso("IN"))
            .region_source(DeviceContext::new().with_sim_region("CA"))
            .build()
            .unwrap();
        assert_eq!(picker.selected_country().iso_code(), iso("IN"));
    }

    #[test]
    fn test_falls_back_to_first_entry() {
        let picker = PickerController::builder(TenDigits)
            .region_source(DeviceContext::new().with_locale("xx"))
            .build()
            .unwrap();
        assert_eq!(picker.selected_country(), CountryTable::global().first());

        let picker = PickerController::builder(TenDigits)
            .detect_country(false)
            .region_source(DeviceContext::new().with_sim_region("CA"))
            .build()
            .unwrap();
        assert_eq!(picker.selected_country(), CountryTable::global().first());
    }

    #[test]
    fn test_country_filter() {
        let picker = PickerController::builder(TenDigits)
            .countries([iso("US"), iso("IN")])
            .detect_country(false)
            .build()
            .unwrap();
        assert_eq!(picker.table().len(), 2);
        assert_eq!(picker.selected_country().iso_code(), iso("US"));
        assert!(picker.search("germany").is_empty());
    }

    #[test]
    fn test_default_outside_filter_is_error() {
        let result = PickerController::builder(TenDigits)
            .countries([iso("US")])
            .default_country(iso("IN"))
            .build();
        assert!(matches!(result, Err(CountryError::UnknownIso { .. })));
    }

    #[test]
    fn test_initial_input() {
        let picker = PickerController::builder(TenDigits)
            .default_country(iso("IN"))
            .initial_input("98765-43210")
            .build()
            .unwrap();
        assert!(picker.state().is_valid());
        assert_eq!(picker.state().formatted().display(), "9876543210");
    }

    #[test]
    fn test_clear_input() {
        let mut picker = picker();
        picker.set_input("9876543210");
        let state = picker.clear_input();
        assert!(state.raw_input().is_empty());
        assert!(!state.is_valid());
    }
}
