//! Static country dataset: lookups by ISO and dial code, search and flags.

pub(crate) mod flag;
pub(crate) mod table;

pub use flag::{FLAG_OFFSET, flag_glyph};
pub use table::{Country, CountryTable, all_countries, find_by_dial_code, find_by_iso};
