//! # Country Code Picker
//!
//! The UI-independent core of a country code picker attached to a phone
//! number field.
//!
//! It provides the static country table, best-effort detection of the
//! device's country, phone number validation against the selected
//! country's dial code, and as-you-type formatting with cursor mapping.
//! Phone metadata comes from libphonenumber through the `phonenumber` crate,
//! behind the [`PhoneNumberService`] trait.
//!
//! ## Quick Start
//!
//! ```rust
//! use country_code_picker::{
//!     DeviceContext, LibPhoneNumberService, PickerController, PickerEvent,
//! };
//!
//! let mut picker = PickerController::builder(LibPhoneNumberService::shared())
//!     .region_source(DeviceContext::new().with_sim_region("US"))
//!     .build()?;
//!
//! picker.subscribe(|event: &PickerEvent| {
//!     let state = event.state();
//!     println!(
//!         "{} {} valid={}",
//!         state.country().flag(),
//!         state.formatted().display(),
//!         state.is_valid()
//!     );
//! });
//!
//! picker.set_input("2025550123");
//! assert_eq!(picker.state().formatted().display(), "(202) 555-0123");
//! assert!(picker.state().is_valid());
//! # Ok::<(), country_code_picker::CountryError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! PickerController<S>
//!         │
//!         ├── Validator<S> ──────┐
//!         ├── PhoneFormatter<S> ─┤
//!         │                      ▼
//!         │              PhoneNumberService   (trait: LibPhoneNumberService, test doubles)
//!         │
//!         ├── CountryTable                    (embedded assets/countries.json)
//!         └── RegionSource                    (DeviceContext, SystemRegionSource)
//! ```
//!
//! ## Features
//!
//! - `tracing` - tracing instrumentation (enabled by default)

pub mod countries;
pub mod errors;
pub mod formatter;
pub mod locale;
pub mod phone;
pub mod picker;
pub mod types;
pub mod validator;

// Re-export commonly used types at the crate root
pub use countries::{
    Country, CountryTable, FLAG_OFFSET, all_countries, find_by_dial_code, find_by_iso, flag_glyph,
};
pub use errors::CountryError;
pub use formatter::{FormattedOutput, OffsetMapping, PhoneFormatter, format};
pub use locale::{
    DeviceContext, RegionSource, SystemRegionSource, normalize_region, resolve_current_country,
    resolve_in, resolve_or_default,
};
pub use phone::{LibPhoneNumberService, PhoneNumberService};
pub use picker::{
    PickerConfig, PickerConfigBuilder, PickerController, PickerControllerBuilder, PickerEvent,
    PickerListener, PickerState, SubscriptionId,
};
pub use types::{DialCode, DialCodeError, IsoCode, IsoCodeError, RawInput};
pub use validator::{Validator, e164_candidate, is_valid};
