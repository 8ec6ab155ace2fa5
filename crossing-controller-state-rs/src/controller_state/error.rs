use core::fmt;

/// Errors that can occur when configuring the shared controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
    /// The single [`PhaseWriter`](super::PhaseWriter) was already handed out.
    PhaseWriterTaken,
    /// A [`PhaseTiming`](super::PhaseTiming) field is zero.
    ZeroDuration,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateError::PhaseWriterTaken => write!(f, "phase writer already taken"),
            StateError::ZeroDuration => write!(f, "phase timing contains a zero duration"),
        }
    }
}
