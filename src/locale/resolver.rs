//! Mapping region hints onto the country table.

use super::source::RegionSource;
use crate::countries::{Country, CountryTable};
use crate::types::IsoCode;
use keshvar::Alpha3;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Turn a raw region hint into an alpha-2 code.
///
/// Accepts alpha-2 codes (`"in"`), alpha-3 codes (`"IND"`) and locale tags
/// (`"en_IN.UTF-8"`, `"hi-IN"`, `"zh-Hans-CN"`). Returns `None` for anything
/// else, including language-only locales such as `"en"` or `"C"`.
///
/// ```rust
/// use country_code_picker::normalize_region;
///
/// assert_eq!(normalize_region("en_US.UTF-8").unwrap().as_str(), "US");
/// assert_eq!(normalize_region("deu").unwrap().as_str(), "DE");
/// assert!(normalize_region("POSIX").is_none());
/// ```
pub fn normalize_region(hint: &str) -> Option<IsoCode> {
    let hint = hint.trim();
    if hint.is_empty() {
        return None;
    }

    // Locale tag: drop codeset and modifier, then look for a region subtag.
    if hint.contains(['_', '-', '.', '@']) {
        let tag = hint.split(['.', '@']).next().unwrap_or_default();
        return tag
            .split(['_', '-'])
            .skip(1)
            .find(|subtag| subtag.len() == 2)
            .and_then(|subtag| IsoCode::new(subtag).ok());
    }

    match hint.len() {
        2 => IsoCode::new(hint).ok(),
        3 => Alpha3::try_from(hint.to_ascii_uppercase().as_str())
            .ok()
            .and_then(|alpha3| IsoCode::new(alpha3.to_country().alpha2().to_string()).ok()),
        _ => None,
    }
}

/// Resolve the device's country against a table.
///
/// Hints are tried in order: network region, SIM region, system locale.
/// The first one that names a country in `table` wins. Empty, malformed or
/// unknown hints are skipped.
pub fn resolve_in<'t, S: RegionSource + ?Sized>(
    table: &'t CountryTable,
    source: &S,
) -> Option<&'t Country> {
    let hints = [
        ("network", source.network_region()),
        ("sim", source.sim_region()),
        ("locale", source.locale_region()),
    ];

    for (_kind, hint) in hints {
        let Some(hint) = hint else {
            continue;
        };
        let country = normalize_region(&hint).and_then(|iso| table.find_by_iso(iso.as_str()).ok());

        match country {
            Some(country) => {
                #[cfg(feature = "tracing")]
                debug!(source = _kind, hint = %hint, country = %country.iso_code(), "Resolved device country");
                return Some(country);
            }
            None => {
                #[cfg(feature = "tracing")]
                debug!(source = _kind, hint = %hint, "Region hint does not match a country");
            }
        }
    }

    None
}

/// Resolve the device's country against the embedded table.
///
/// Never panics; returns `None` when no hint names a known country.
pub fn resolve_current_country<S: RegionSource + ?Sized>(source: &S) -> Option<Country> {
    resolve_in(CountryTable::global(), source).cloned()
}

/// Resolve against a table, falling back to its first entry.
pub fn resolve_or_default<'t, S: RegionSource + ?Sized>(
    table: &'t CountryTable,
    source: &S,
) -> &'t Country {
    resolve_in(table, source).unwrap_or_else(|| table.first())
}
