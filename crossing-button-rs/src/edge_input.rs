//! Registered button pins and event filtering.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::debounce::{DebounceConfig, DebounceGuard, DebounceScope};
use crate::error::ButtonError;

/// Called with the pin number of every accepted press.
///
/// Runs in the context that reported the edge, so it must return quickly
/// and must not block.
pub type ButtonCallback = fn(u8);

/// Debounced falling-edge input for up to `N` pins.
///
/// Pins are registered with [`configure()`](Self::configure); the edge
/// source (interrupt handler or `button_task`) reports every falling edge
/// through [`on_event()`](Self::on_event).
pub struct EdgeDebouncer<const N: usize> {
    scope: DebounceScope,
    shared: DebounceGuard,
    pins: Vec<(u8, DebounceGuard), N>,
    callback: Option<ButtonCallback>,
}

impl<const N: usize> EdgeDebouncer<N> {
    /// Create a debouncer with no pins and no callback.
    pub fn new(config: DebounceConfig) -> Self {
        let interval = Duration::from_millis(config.guard_interval_ms);
        Self {
            scope: config.scope,
            shared: DebounceGuard::new(interval),
            pins: Vec::new(),
            callback: None,
        }
    }

    /// Install the press callback. Replaces any previous callback.
    pub fn set_callback(&mut self, callback: ButtonCallback) {
        self.callback = Some(callback);
    }

    /// Register interest in falling edges on `pin`.
    ///
    /// The pin itself must already be an input with pull-up; that is the
    /// HAL's job.
    ///
    /// # Errors
    /// * [`ButtonError::DuplicatePin`] if `pin` is already registered
    /// * [`ButtonError::TooManyPins`] if `N` pins are already registered
    pub fn configure(&mut self, pin: u8) -> Result<(), ButtonError> {
        if self.is_configured(pin) {
            return Err(ButtonError::DuplicatePin(pin));
        }
        self.pins
            .push((pin, DebounceGuard::new(self.shared.interval())))
            .map_err(|_| ButtonError::TooManyPins)
    }

    /// `true` if `pin` has been registered.
    pub fn is_configured(&self, pin: u8) -> bool {
        self.pins.iter().any(|(p, _)| *p == pin)
    }

    /// Report a falling edge on `pin` at `timestamp`.
    ///
    /// Returns `true` if the event passed the debounce guard; the callback
    /// (if any) has then been invoked with `pin`. Events on unregistered
    /// pins are dropped.
    pub fn on_event(&mut self, pin: u8, timestamp: Instant) -> bool {
        let Some(slot) = self.pins.iter_mut().position(|(p, _)| *p == pin) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Edge on unregistered pin {}", pin);
            return false;
        };

        let guard = match self.scope {
            DebounceScope::Shared => &mut self.shared,
            DebounceScope::PerPin => &mut self.pins[slot].1,
        };
        if !guard.accept(timestamp) {
            return false;
        }

        if let Some(callback) = self.callback {
            callback(pin);
        }
        true
    }
}
