use embassy_time::{Duration, Instant};

use super::error::StateError;
use super::phase::LightPhase;

/// Dwell times for the phase cycle.
///
/// [`PhaseTiming::default()`] reproduces the deployed crossing:
/// Green and Red 5 s, Yellow 3 s, Green and Red 500 ms under night mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseTiming {
    /// Green and Red dwell in normal operation. Default: 5000.
    pub go_stop_ms: u64,
    /// Yellow dwell, day and night. Default: 3000.
    pub yellow_ms: u64,
    /// Green and Red dwell under night mode. Default: 500.
    pub night_ms: u64,
    /// Longest the advancer sleeps before re-reading night mode. Default: 10.
    pub poll_interval_ms: u64,
}

impl Default for PhaseTiming {
    fn default() -> Self {
        Self {
            go_stop_ms: 5000,
            yellow_ms: 3000,
            night_ms: 500,
            poll_interval_ms: super::POLL_INTERVAL_MS,
        }
    }
}

impl PhaseTiming {
    /// Reject timings that would make the advancer spin.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.go_stop_ms == 0
            || self.yellow_ms == 0
            || self.night_ms == 0
            || self.poll_interval_ms == 0
        {
            return Err(StateError::ZeroDuration);
        }
        Ok(())
    }

    /// How long `phase` is held.
    pub fn dwell(&self, phase: LightPhase, night_mode: bool) -> Duration {
        let ms = match (phase, night_mode) {
            (LightPhase::Yellow, _) => self.yellow_ms,
            (_, true) => self.night_ms,
            (_, false) => self.go_stop_ms,
        };
        Duration::from_millis(ms)
    }

    /// [`poll_interval_ms`](Self::poll_interval_ms) as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Phase sequencer.
///
/// Holds the current phase and when it was entered. The dwell is evaluated
/// against the *current* night-mode flag on every poll, so toggling night
/// mode part-way through Green or Red shortens (or lengthens) that phase
/// immediately instead of at the next transition.
///
/// Kept free of timers so it can be driven from tests with synthetic
/// instants; [`phase_advance_task`](super::phase_advance_task) supplies
/// `Instant::now()`.
#[derive(Debug, Clone, Copy)]
pub struct PhaseAdvancer {
    phase: LightPhase,
    entered_at: Instant,
    timing: PhaseTiming,
}

impl PhaseAdvancer {
    /// Start the cycle at Green, entered at `now`.
    pub fn new(timing: PhaseTiming, now: Instant) -> Self {
        Self {
            phase: LightPhase::Green,
            entered_at: now,
            timing,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> LightPhase {
        self.phase
    }

    /// When the current phase was entered.
    pub fn entered_at(&self) -> Instant {
        self.entered_at
    }

    /// When the current phase ends, given the night-mode flag.
    pub fn deadline(&self, night_mode: bool) -> Instant {
        self.entered_at + self.timing.dwell(self.phase, night_mode)
    }

    /// Advance if the current dwell has elapsed.
    ///
    /// Returns the new phase on a transition. The new phase is entered at
    /// `now`, so a late poll never produces a burst of transitions.
    pub fn poll(&mut self, now: Instant, night_mode: bool) -> Option<LightPhase> {
        if now < self.deadline(night_mode) {
            return None;
        }
        self.phase = self.phase.next();
        self.entered_at = now;
        Some(self.phase)
    }

    /// When the advancer next needs to run: the phase deadline, or one poll
    /// interval from `now`, whichever comes first.
    pub fn next_wake(&self, now: Instant, night_mode: bool) -> Instant {
        self.deadline(night_mode)
            .min(now + self.timing.poll_interval())
    }
}
