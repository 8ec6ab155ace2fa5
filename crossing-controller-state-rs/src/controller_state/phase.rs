/// One state of the traffic-light cycle.
///
/// The stored phase only ever cycles `Green → Yellow → Red → Green`.
/// `NightBlink` is the synthetic "off" step of the night-mode blink pattern
/// and only appears as a [strip view](LightPhase::strip_view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightPhase {
    /// Traffic may go, pedestrians wait.
    #[default]
    Green,
    /// Caution.
    Yellow,
    /// Traffic stops, pedestrians may cross.
    Red,
    /// Night-mode blink, all lights off.
    NightBlink,
}

impl LightPhase {
    /// Number of distinct phases, including [`NightBlink`](Self::NightBlink).
    pub const COUNT: usize = 4;

    /// The phase that follows `self` in the normal cycle.
    pub fn next(self) -> Self {
        match self {
            LightPhase::Green => LightPhase::Yellow,
            LightPhase::Yellow => LightPhase::Red,
            LightPhase::Red => LightPhase::Green,
            LightPhase::NightBlink => LightPhase::Green,
        }
    }

    /// Table index of this phase (Green 0, Yellow 1, Red 2, NightBlink 3).
    ///
    /// Per-phase tables (colours, tones, messages) are indexed with this.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Phase as seen by the LED strip.
    ///
    /// Under night mode every phase except Yellow collapses to
    /// [`NightBlink`](Self::NightBlink), so the strip blinks yellow.
    pub fn strip_view(self, night_mode: bool) -> Self {
        if night_mode && self != LightPhase::Yellow {
            LightPhase::NightBlink
        } else {
            self
        }
    }

    /// Phase as seen by the buzzer and the display.
    ///
    /// Under night mode everything collapses to Yellow, so the alert stays on
    /// "caution" for the whole blink cycle.
    pub fn alert_view(self, night_mode: bool) -> Self {
        if night_mode || self == LightPhase::NightBlink {
            LightPhase::Yellow
        } else {
            self
        }
    }
}
