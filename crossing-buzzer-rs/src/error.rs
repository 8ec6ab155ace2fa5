//! Error types for the buzzer driver.

use core::fmt;

/// Errors that can occur while playing a tone.
#[derive(Debug)]
pub enum BuzzerError<E> {
    /// The PWM output rejected a configuration change.
    Output(E),

    /// The PWM counter cannot produce this frequency.
    UnsupportedFrequency(u32),
}

// Allow ergonomic `?` propagation from raw output errors.
impl<E> From<E> for BuzzerError<E> {
    fn from(error: E) -> Self {
        BuzzerError::Output(error)
    }
}

impl<E: fmt::Debug> fmt::Display for BuzzerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuzzerError::Output(e) => write!(f, "PWM output error: {:?}", e),
            BuzzerError::UnsupportedFrequency(hz) => write!(f, "Unsupported frequency: {} Hz", hz),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for BuzzerError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            BuzzerError::Output(e) => defmt::write!(f, "PWM output error: {}", e),
            BuzzerError::UnsupportedFrequency(hz) => {
                defmt::write!(f, "Unsupported frequency: {} Hz", hz)
            }
        }
    }
}
