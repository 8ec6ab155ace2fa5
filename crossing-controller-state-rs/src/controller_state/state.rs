use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::error::StateError;
use super::phase::LightPhase;

/// Critical-section guarded cell holding one shared field.
type SharedCell<T> = Mutex<CriticalSectionRawMutex, Cell<T>>;

/// Consistent copy of both shared fields, taken by the peripheral tasks once
/// per poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateSnapshot {
    /// Stored phase at the time of the snapshot.
    pub phase: LightPhase,
    /// Night-mode flag at the time of the snapshot.
    pub night_mode: bool,
}

impl StateSnapshot {
    /// See [`LightPhase::strip_view`].
    pub fn strip_view(&self) -> LightPhase {
        self.phase.strip_view(self.night_mode)
    }

    /// See [`LightPhase::alert_view`].
    pub fn alert_view(&self) -> LightPhase {
        self.phase.alert_view(self.night_mode)
    }
}

/// Controller state shared between the phase advancer, the button callback
/// and the peripheral tasks.
///
/// Intended to live in a `static`:
///
/// ```
/// use crossing::controller_state::ControllerState;
///
/// static STATE: ControllerState = ControllerState::new();
///
/// assert!(!STATE.night_mode());
/// STATE.toggle_night_mode();
/// assert!(STATE.night_mode());
/// ```
///
/// # Writers
///
/// * The phase is written only through the [`PhaseWriter`] returned by
///   [`take_phase_writer()`](Self::take_phase_writer).
/// * Night mode is written only by the debounced button callback via
///   [`toggle_night_mode()`](Self::toggle_night_mode).
pub struct ControllerState {
    phase: SharedCell<LightPhase>,
    night_mode: SharedCell<bool>,
    writer_taken: SharedCell<bool>,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerState {
    /// Power-on state: Green, night mode off, phase writer available.
    pub const fn new() -> Self {
        Self {
            phase: Mutex::new(Cell::new(LightPhase::Green)),
            night_mode: Mutex::new(Cell::new(false)),
            writer_taken: Mutex::new(Cell::new(false)),
        }
    }

    // ── Phase ────────────────────────────────────────────────────────

    /// Current stored phase.
    pub fn phase(&self) -> LightPhase {
        self.phase.lock(Cell::get)
    }

    /// Hand out the single writer for the phase field.
    ///
    /// Returns [`StateError::PhaseWriterTaken`] on every call after the
    /// first.
    pub fn take_phase_writer(&self) -> Result<PhaseWriter<'_>, StateError> {
        let already_taken = self.writer_taken.lock(|taken| taken.replace(true));
        if already_taken {
            return Err(StateError::PhaseWriterTaken);
        }
        Ok(PhaseWriter { state: self })
    }

    // ── Night mode ───────────────────────────────────────────────────

    /// Current night-mode flag.
    pub fn night_mode(&self) -> bool {
        self.night_mode.lock(Cell::get)
    }

    /// Flip the night-mode flag and return the new value.
    ///
    /// Safe to call from the button callback: it only holds a critical
    /// section for the read-modify-write.
    pub fn toggle_night_mode(&self) -> bool {
        self.night_mode.lock(|night| {
            let on = !night.get();
            night.set(on);
            on
        })
    }

    /// Read both fields.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            phase: self.phase(),
            night_mode: self.night_mode(),
        }
    }
}

/// Exclusive write access to [`ControllerState`]'s phase field.
///
/// Only one exists per `ControllerState`; it is owned by the phase advancer.
pub struct PhaseWriter<'a> {
    state: &'a ControllerState,
}

impl PhaseWriter<'_> {
    /// Publish a new phase to all readers.
    pub fn set(&mut self, phase: LightPhase) {
        self.state.phase.lock(|cell| cell.set(phase));
    }

    /// The phase most recently published.
    pub fn get(&self) -> LightPhase {
        self.state.phase()
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state() {
        let state = ControllerState::new();
        assert_eq!(state.phase(), LightPhase::Green);
        assert!(!state.night_mode());
        assert_eq!(
            state.snapshot(),
            StateSnapshot {
                phase: LightPhase::Green,
                night_mode: false
            }
        );
    }

    #[test]
    fn phase_writer_is_handed_out_once() {
        let state = ControllerState::new();
        let writer = state.take_phase_writer();
        assert!(writer.is_ok());
        assert_eq!(
            state.take_phase_writer().err(),
            Some(StateError::PhaseWriterTaken)
        );
    }

    #[test]
    fn phase_writer_publishes_to_readers() {
        let state = ControllerState::new();
        let mut writer = state.take_phase_writer().unwrap();
        writer.set(LightPhase::Red);
        assert_eq!(writer.get(), LightPhase::Red);
        assert_eq!(state.phase(), LightPhase::Red);
    }

    #[test]
    fn toggle_night_mode_returns_new_value() {
        let state = ControllerState::new();
        assert!(state.toggle_night_mode());
        assert!(state.night_mode());
        assert!(!state.toggle_night_mode());
        assert!(!state.night_mode());
    }

    #[test]
    fn snapshot_views_follow_night_mode() {
        static STATE: ControllerState = ControllerState::new();
        let mut writer = STATE.take_phase_writer().unwrap();
        writer.set(LightPhase::Red);

        let day = STATE.snapshot();
        assert_eq!(day.strip_view(), LightPhase::Red);
        assert_eq!(day.alert_view(), LightPhase::Red);

        STATE.toggle_night_mode();
        let night = STATE.snapshot();
        assert_eq!(night.strip_view(), LightPhase::NightBlink);
        assert_eq!(night.alert_view(), LightPhase::Yellow);
    }
}
