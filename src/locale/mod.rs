//! Best-effort detection of the device's country.

pub(crate) mod resolver;
pub(crate) mod source;

pub use resolver::{normalize_region, resolve_current_country, resolve_in, resolve_or_default};
pub use source::{DeviceContext, RegionSource, SystemRegionSource};
