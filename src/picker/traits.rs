//! Listener trait definition.

use super::state::PickerEvent;

/// Receives picker changes.
///
/// Implemented for every `FnMut(&PickerEvent)` closure, so most callers
/// just pass a closure to
/// [`PickerController::subscribe`](crate::PickerController::subscribe).
pub trait PickerListener {
    /// Called synchronously after the controller state has been replaced.
    fn on_event(&mut self, event: &PickerEvent);
}

impl<F: FnMut(&PickerEvent)> PickerListener for F {
    fn on_event(&mut self, event: &PickerEvent) {
        self(event)
    }
}
