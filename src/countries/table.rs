//! Embedded country table and lookups.

use crate::errors::CountryError;
use crate::types::{DialCode, IsoCode};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// Raw JSON entry for a country.
#[derive(Debug, Deserialize)]
struct CountryEntry {
    name: String,
    code: IsoCode,
    dial_code: DialCode,
}

/// Countries JSON embedded at compile time.
static COUNTRIES_JSON: &str = include_str!("../../assets/countries.json");

/// The embedded table, built on first use.
static GLOBAL_TABLE: Lazy<CountryTable> = Lazy::new(|| {
    let entries: Vec<CountryEntry> =
        serde_json::from_str(COUNTRIES_JSON).expect("countries.json is invalid");

    let countries = entries
        .into_iter()
        .map(|entry| Country::new(entry.name, entry.code, entry.dial_code))
        .collect();

    CountryTable::from_countries(countries)
});

/// Name normalization for stable comparison.
/// Converts to lowercase and removes punctuation/extra whitespace.
fn norm(s: &str) -> String {
    const PUNCT: &[char] = &[
        '\'', '"', '`', ',', '.', '-', '_', '(', ')', '\u{2018}',
        '\u{2019}', // curly single quotes ' '
        '\u{00B4}', // acute accent ´
    ];
    s.to_lowercase()
        .replace(PUNCT, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Country
// =============================================================================

/// A country entry: English name, ISO code and international dial code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    name: String,
    iso_code: IsoCode,
    dial_code: DialCode,
}

impl Country {
    /// Create a new Country record.
    pub fn new(name: impl Into<String>, iso_code: IsoCode, dial_code: DialCode) -> Self {
        Self {
            name: name.into(),
            iso_code,
            dial_code,
        }
    }

    /// English short name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ISO 3166-1 alpha-2 code, the unique key of the table.
    pub fn iso_code(&self) -> IsoCode {
        self.iso_code
    }

    /// Dial code without the '+' sign.
    pub fn dial_code(&self) -> &DialCode {
        &self.dial_code
    }

    /// Dial code with the '+' sign, as shown in the picker (e.g., "+91").
    pub fn full_dial_code(&self) -> String {
        self.dial_code.with_plus()
    }

    /// Flag emoji derived from the ISO code.
    pub fn flag(&self) -> String {
        self.iso_code.flag()
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) +{}", self.name, self.iso_code, self.dial_code)
    }
}

// =============================================================================
// CountryTable
// =============================================================================

/// Ordered, immutable list of countries with an ISO index.
///
/// The table is never empty: every constructor either starts from the
/// embedded data or rejects an empty selection.
#[derive(Debug, Clone)]
pub struct CountryTable {
    countries: Vec<Country>,
    by_iso: HashMap<IsoCode, usize>,
}

impl CountryTable {
    fn from_countries(countries: Vec<Country>) -> Self {
        let mut by_iso = HashMap::with_capacity(countries.len());
        for (idx, country) in countries.iter().enumerate() {
            by_iso.entry(country.iso_code).or_insert(idx);
        }
        Self { countries, by_iso }
    }

    /// The embedded table shared by the whole process.
    pub fn global() -> &'static CountryTable {
        &GLOBAL_TABLE
    }

    /// Build a table restricted to the given ISO codes, in the given order.
    ///
    /// Duplicate codes are kept once. Unknown codes are an error rather than
    /// being silently dropped.
    pub fn from_iso_codes<I>(codes: I) -> Result<Self, CountryError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let global = Self::global();
        let mut countries: Vec<Country> = Vec::new();
        for code in codes {
            let country = global.find_by_iso(code.as_ref())?;
            if !countries.iter().any(|c| c.iso_code == country.iso_code) {
                countries.push(country.clone());
            }
        }
        if countries.is_empty() {
            return Err(CountryError::EmptyTable);
        }
        Ok(Self::from_countries(countries))
    }

    /// All countries in table order.
    pub fn all(&self) -> &[Country] {
        &self.countries
    }

    /// Number of countries in the table.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Always false for tables built through the public constructors.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// First entry in table order, used as the fallback country.
    pub fn first(&self) -> &Country {
        // Constructors guarantee at least one entry.
        &self.countries[0]
    }

    /// Look up a country by ISO code, ignoring case and surrounding whitespace.
    pub fn find_by_iso(&self, code: &str) -> Result<&Country, CountryError> {
        IsoCode::new(code)
            .ok()
            .and_then(|iso| self.by_iso.get(&iso))
            .map(|&idx| &self.countries[idx])
            .ok_or_else(|| CountryError::UnknownIso {
                code: code.trim().to_string(),
            })
    }

    /// Look up the first country (in table order) with this dial code.
    ///
    /// Several countries can share a dial code ("1" covers the whole North
    /// American Numbering Plan). This returns whichever comes first in the
    /// table, which for "1" is not the United States. Use
    /// [`CountryTable::countries_with_dial_code`] when the distinction matters.
    pub fn find_by_dial_code(&self, code: &str) -> Result<&Country, CountryError> {
        let unknown = || CountryError::UnknownDialCode {
            dial_code: code.trim().trim_start_matches('+').to_string(),
        };
        let dial_code = DialCode::new(code).map_err(|_| unknown())?;
        self.countries
            .iter()
            .find(|c| c.dial_code == dial_code)
            .ok_or_else(unknown)
    }

    /// All countries sharing a dial code, in table order.
    pub fn countries_with_dial_code(&self, code: &str) -> Vec<&Country> {
        let Ok(dial_code) = DialCode::new(code) else {
            return Vec::new();
        };
        self.countries
            .iter()
            .filter(|c| c.dial_code == dial_code)
            .collect()
    }

    /// Filter the table for the picker's search box.
    ///
    /// A country matches when its normalized name contains the normalized
    /// query, when the query equals its ISO code, or when the query (with
    /// or without '+') is a prefix of its dial code. An empty query matches
    /// everything. Table order is preserved.
    pub fn search(&self, query: &str) -> Vec<&Country> {
        let key = norm(query);
        if key.is_empty() {
            return self.countries.iter().collect();
        }

        let digits = query.trim().trim_start_matches('+');
        let dial_prefix = (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .then_some(digits);
        let iso = IsoCode::new(query).ok();

        self.countries
            .iter()
            .filter(|c| {
                if let Some(prefix) = dial_prefix {
                    return c.dial_code.as_str().starts_with(prefix);
                }
                iso == Some(c.iso_code) || norm(&c.name).contains(&key)
            })
            .collect()
    }
}

impl Default for CountryTable {
    fn default() -> Self {
        Self::global().clone()
    }
}

// =============================================================================
// Global shortcuts
// =============================================================================

/// All countries of the embedded table, in fixed order.
pub fn all_countries() -> &'static [Country] {
    CountryTable::global().all()
}

/// Look up a country of the embedded table by ISO code (case-insensitive).
pub fn find_by_iso(code: &str) -> Result<&'static Country, CountryError> {
    CountryTable::global().find_by_iso(code)
}

/// Look up the first country of the embedded table with this dial code.
pub fn find_by_dial_code(code: &str) -> Result<&'static Country, CountryError> {
    CountryTable::global().find_by_dial_code(code)
}
