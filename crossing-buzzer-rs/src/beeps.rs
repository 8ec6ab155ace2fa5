//! Per-phase beep table and scheduling.

use crossing::controller_state::{ChangeTracker, LightPhase, StateSnapshot, POLL_INTERVAL_MS};
use embassy_time::{Duration, Instant};

/// Tone and repeat period for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Beep {
    pub frequency_hz: u32,
    pub duration_ms: u32,
    /// Time between two beeps while the phase is unchanged.
    pub repeat_ms: u64,
}

impl Beep {
    pub const fn new(frequency_hz: u32, duration_ms: u32, repeat_ms: u64) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            repeat_ms,
        }
    }
}

/// Beeps indexed by [`LightPhase::index`].
///
/// | Slot       | Tone             | Repeat  |
/// |------------|------------------|---------|
/// | Green      | 3000 Hz, 1000 ms | 5000 ms |
/// | Yellow     | 2000 Hz, 300 ms  | 500 ms  |
/// | Red        | 1000 Hz, 500 ms  | 1500 ms |
/// | NightBlink | 2000 Hz, 300 ms  | 2000 ms |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeepTable {
    pub beeps: [Beep; LightPhase::COUNT],
}

impl Default for BeepTable {
    fn default() -> Self {
        Self {
            beeps: [
                Beep::new(3000, 1000, 5000),
                Beep::new(2000, 300, 500),
                Beep::new(1000, 500, 1500),
                Beep::new(2000, 300, 2000),
            ],
        }
    }
}

impl BeepTable {
    /// The beep to play for `view`.
    pub fn tone(&self, view: LightPhase) -> Beep {
        self.beeps[view.index()]
    }

    /// Repeat period while showing `view`.
    ///
    /// In night mode the period always comes from the night slot, even
    /// though the tone itself comes from the Yellow slot.
    pub fn repeat_interval(&self, view: LightPhase, night_mode: bool) -> Duration {
        let slot = if night_mode {
            LightPhase::NightBlink.index()
        } else {
            view.index()
        };
        Duration::from_millis(self.beeps[slot].repeat_ms)
    }
}

/// Buzzer task settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuzzerConfig {
    pub beeps: BeepTable,
    /// State poll period. Default: 10 ms.
    pub poll_interval_ms: u64,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            beeps: BeepTable::default(),
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }
}

/// Decides when to beep.
///
/// A beep is due when the alert view differs from the last one beeped, or
/// when strictly more than the repeat period has passed since the last
/// beep started.
pub struct BeepScheduler {
    table: BeepTable,
    last_view: ChangeTracker<LightPhase>,
    last_beep_at: Option<Instant>,
}

impl BeepScheduler {
    pub const fn new(table: BeepTable) -> Self {
        Self {
            table,
            last_view: ChangeTracker::new(),
            last_beep_at: None,
        }
    }

    /// Check `snapshot` at `now` and return the beep to play, if one is due.
    ///
    /// A returned beep counts as played: the next one is measured from
    /// `now` whether or not playback succeeds.
    pub fn poll(&mut self, now: Instant, snapshot: StateSnapshot) -> Option<Beep> {
        let view = snapshot.alert_view();
        let interval = self.table.repeat_interval(view, snapshot.night_mode);

        let repeat_due = match self.last_beep_at {
            None => true,
            Some(last) => now
                .checked_duration_since(last)
                .is_some_and(|elapsed| elapsed > interval),
        };
        if !self.last_view.is_changed(view) && !repeat_due {
            return None;
        }

        self.last_view.commit(view);
        self.last_beep_at = Some(now);
        Some(self.table.tone(view))
    }

    /// When the last beep was handed out.
    pub fn last_beep_at(&self) -> Option<Instant> {
        self.last_beep_at
    }
}
