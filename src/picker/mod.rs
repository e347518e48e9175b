//! Picker controller: selected country, typed digits and change notification.

pub(crate) mod config;
pub(crate) mod state;
pub(crate) mod structure;
pub(crate) mod traits;

pub use config::{PickerConfig, PickerConfigBuilder};
pub use state::{PickerEvent, PickerState};
pub use structure::{PickerController, PickerControllerBuilder, SubscriptionId};
pub use traits::PickerListener;
