//! Error types for the button driver.

use core::fmt;

/// Errors that can occur while configuring button inputs.
///
/// Runtime events never fail: an edge on an unregistered pin is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonError {
    /// More pins registered than the debouncer's capacity.
    TooManyPins,

    /// The pin is already registered.
    DuplicatePin(u8),
}

impl fmt::Display for ButtonError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ButtonError::TooManyPins => write!(f, "Too many button pins registered"),
            ButtonError::DuplicatePin(pin) => write!(f, "Button pin {} already registered", pin),
        }
    }
}
