//! Where region hints come from.

use std::env;

/// Best-effort region hints from the device.
///
/// Every method may return `None` or stale data (missing permissions, no
/// SIM, airplane mode). Values are raw: alpha-2 or alpha-3 codes for the
/// telephony hints, a locale tag such as `en_US.UTF-8` for the locale.
pub trait RegionSource {
    /// Region reported by the mobile network.
    fn network_region(&self) -> Option<String> {
        None
    }

    /// Region of the SIM card.
    fn sim_region(&self) -> Option<String> {
        None
    }

    /// Default locale tag of the system.
    fn locale_region(&self) -> Option<String> {
        None
    }
}

impl<T: RegionSource + ?Sized> RegionSource for &T {
    fn network_region(&self) -> Option<String> {
        (**self).network_region()
    }

    fn sim_region(&self) -> Option<String> {
        (**self).sim_region()
    }

    fn locale_region(&self) -> Option<String> {
        (**self).locale_region()
    }
}

/// Region hints captured up front, e.g. by platform glue code.
///
/// # Example
///
/// ```rust
/// use country_code_picker::{DeviceContext, resolve_current_country};
///
/// let device = DeviceContext::new().with_sim_region("in");
/// let country = resolve_current_country(&device).unwrap();
/// assert_eq!(country.name(), "India");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceContext {
    pub network_region: Option<String>,
    pub sim_region: Option<String>,
    pub locale: Option<String>,
}

impl DeviceContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the network-reported region.
    pub fn with_network_region(mut self, region: impl Into<String>) -> Self {
        self.network_region = Some(region.into());
        self
    }

    /// Set the SIM region.
    pub fn with_sim_region(mut self, region: impl Into<String>) -> Self {
        self.sim_region = Some(region.into());
        self
    }

    /// Set the locale tag.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

impl RegionSource for DeviceContext {
    fn network_region(&self) -> Option<String> {
        self.network_region.clone()
    }

    fn sim_region(&self) -> Option<String> {
        self.sim_region.clone()
    }

    fn locale_region(&self) -> Option<String> {
        self.locale.clone()
    }
}

/// POSIX locale variables checked in priority order.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Region hints for hosts without telephony: only the POSIX locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRegionSource;

impl RegionSource for SystemRegionSource {
    fn locale_region(&self) -> Option<String> {
        LOCALE_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.trim().is_empty())
    }
}
