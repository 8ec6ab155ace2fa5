use embedded_hal::digital::{OutputPin, PinState};

use super::phase::LightPhase;

/// Levels of the two indicator wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorLevels {
    pub green: bool,
    pub red: bool,
}

/// Map a phase onto the 2-wire RGB indicator.
///
/// Yellow is shown by asserting both wires. Night mode asserts neither,
/// except during Yellow, which keeps both on so the indicator blinks yellow
/// in step with the strip.
pub fn indicator_levels(phase: LightPhase, night_mode: bool) -> IndicatorLevels {
    let (green, red) = match (phase, night_mode) {
        (LightPhase::Yellow, _) => (true, true),
        (_, true) | (LightPhase::NightBlink, _) => (false, false),
        (LightPhase::Green, false) => (true, false),
        (LightPhase::Red, false) => (false, true),
    };
    IndicatorLevels { green, red }
}

/// Two plain GPIO outputs driven from the phase.
pub struct RgbIndicator<G, R> {
    green: G,
    red: R,
}

impl<G, R> RgbIndicator<G, R>
where
    G: OutputPin,
    R: OutputPin<Error = G::Error>,
{
    /// Take ownership of the two output pins. No pin is touched until
    /// [`show()`](Self::show).
    pub fn new(green: G, red: R) -> Self {
        Self { green, red }
    }

    /// Drive both wires for `phase`.
    pub fn show(
        &mut self,
        phase: LightPhase,
        night_mode: bool,
    ) -> Result<IndicatorLevels, G::Error> {
        let levels = indicator_levels(phase, night_mode);
        self.green.set_state(PinState::from(levels.green))?;
        self.red.set_state(PinState::from(levels.red))?;
        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct MockPin {
        high: bool,
        writes: usize,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn day_levels() {
        assert_eq!(
            indicator_levels(LightPhase::Green, false),
            IndicatorLevels { green: true, red: false }
        );
        assert_eq!(
            indicator_levels(LightPhase::Yellow, false),
            IndicatorLevels { green: true, red: true }
        );
        assert_eq!(
            indicator_levels(LightPhase::Red, false),
            IndicatorLevels { green: false, red: true }
        );
    }

    #[test]
    fn night_levels_keep_only_yellow() {
        assert_eq!(
            indicator_levels(LightPhase::Green, true),
            IndicatorLevels { green: false, red: false }
        );
        assert_eq!(
            indicator_levels(LightPhase::Yellow, true),
            IndicatorLevels { green: true, red: true }
        );
        assert_eq!(
            indicator_levels(LightPhase::Red, true),
            IndicatorLevels { green: false, red: false }
        );
    }

    #[test]
    fn show_drives_both_pins() {
        let mut indicator = RgbIndicator::new(MockPin::default(), MockPin::default());
        indicator.show(LightPhase::Red, false).unwrap();
        assert!(!indicator.green.high);
        assert!(indicator.red.high);

        indicator.show(LightPhase::Yellow, false).unwrap();
        assert!(indicator.green.high);
        assert!(indicator.red.high);
        assert_eq!(indicator.green.writes, 2);
        assert_eq!(indicator.red.writes, 2);
    }
}
