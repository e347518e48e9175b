//! [`PhoneNumberService`] backed by the `phonenumber` crate's metadata.

use super::template::{FormatTemplate, format_with};
use super::traits::PhoneNumberService;
use crate::types::IsoCode;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::panic;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::{trace, warn};

static SHARED: Lazy<LibPhoneNumberService> = Lazy::new(LibPhoneNumberService::new);

/// Phone metadata from libphonenumber, via the `phonenumber` crate.
///
/// Validation parses the candidate and asks libphonenumber whether it is a
/// valid number. As-you-type templates are compiled once per region and
/// cached, so the service is cheap enough to call on every keystroke.
///
/// # Example
///
/// ```rust
/// use country_code_picker::{IsoCode, LibPhoneNumberService, PhoneNumberService};
///
/// let service = LibPhoneNumberService::shared();
/// assert!(service.is_possible_or_valid_number("+919876543210"));
/// assert!(!service.is_possible_or_valid_number("+91123"));
///
/// let us = IsoCode::new("US").unwrap();
/// assert_eq!(service.as_you_type_format("20", us), "20");
/// ```
#[derive(Debug, Default)]
pub struct LibPhoneNumberService {
    templates: DashMap<IsoCode, Arc<[FormatTemplate]>>,
}

impl LibPhoneNumberService {
    /// Create a service with an empty template cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance shared by the free functions of this crate.
    pub fn shared() -> &'static LibPhoneNumberService {
        &SHARED
    }

    /// Compiled templates for a region, building them on first use.
    fn templates_for(&self, region: IsoCode) -> Arc<[FormatTemplate]> {
        if let Some(templates) = self.templates.get(&region) {
            return templates.value().clone();
        }
        let compiled = compile_region(region);
        self.templates
            .entry(region)
            .or_insert(compiled)
            .value()
            .clone()
    }
}

/// Compile every usable national format of a region.
fn compile_region(region: IsoCode) -> Arc<[FormatTemplate]> {
    let Some(metadata) = phonenumber::metadata::DATABASE.by_id(region.as_str()) else {
        #[cfg(feature = "tracing")]
        trace!(region = %region, "No phone metadata for region");
        return Arc::from(Vec::new());
    };

    // Regions sharing a calling code may defer to the main region's formats.
    let formats = if metadata.formats().is_empty() {
        phonenumber::metadata::DATABASE
            .by_code(&metadata.country_code())
            .and_then(|regions| {
                regions
                    .into_iter()
                    .find(|m| m.is_main_country_for_code())
            })
            .map_or(metadata.formats(), |main| main.formats())
    } else {
        metadata.formats()
    };

    let templates: Vec<FormatTemplate> = formats
        .iter()
        .filter_map(|format| {
            FormatTemplate::compile(
                format.pattern().as_str(),
                format.format(),
                format.leading_digits().iter().map(|ld| ld.as_str()),
            )
        })
        .collect();

    #[cfg(feature = "tracing")]
    trace!(
        region = %region,
        formats = formats.len(),
        templates = templates.len(),
        "Compiled as-you-type templates"
    );

    Arc::from(templates)
}

impl PhoneNumberService for LibPhoneNumberService {
    fn is_possible_or_valid_number(&self, e164_candidate: &str) -> bool {
        let candidate = e164_candidate.to_string();

        // The parser has unwraps on some malformed inputs.
        let result = panic::catch_unwind(move || phonenumber::parse(None, candidate));

        match result {
            Ok(Ok(number)) => phonenumber::is_valid(&number),
            Ok(Err(_err)) => {
                #[cfg(feature = "tracing")]
                trace!(error = ?_err, "Phone number did not parse");
                false
            }
            Err(_) => {
                #[cfg(feature = "tracing")]
                warn!(
                    candidate = e164_candidate,
                    "phonenumber parser panicked, treating number as invalid"
                );
                false
            }
        }
    }

    fn as_you_type_format(&self, digits: &str, region: IsoCode) -> String {
        let templates = self.templates_for(region);
        format_with(&templates, digits).unwrap_or_else(|| digits.to_string())
    }
}
