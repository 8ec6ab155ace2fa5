//! PWM square-wave tones.

use embedded_hal_async::delay::DelayNs;

use crate::error::BuzzerError;

/// Counter settings for one PWM period.
///
/// The counter runs at `clock_hz / divider` and wraps after `top + 1`
/// ticks; the output is high while the count is below `compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Integer clock divider, `1..=255`.
    pub divider: u8,
    /// Wrap value of the counter.
    pub top: u16,
    /// Duty threshold, half the period for a square wave.
    pub compare: u16,
}

impl PwmTiming {
    /// Fit `frequency_hz` into an 8-bit divider and a 16-bit counter.
    ///
    /// The smallest divider that keeps the period inside 16 bits is used,
    /// so the counter keeps as much resolution as possible. Returns `None`
    /// for 0 Hz, for frequencies above `clock_hz / 2`, and for frequencies
    /// too low to reach even with the largest divider.
    pub fn for_frequency(clock_hz: u32, frequency_hz: u32) -> Option<Self> {
        if frequency_hz == 0 {
            return None;
        }
        let period_ticks = clock_hz / frequency_hz;
        if period_ticks < 2 {
            return None;
        }

        let divider = period_ticks.div_ceil(1 << 16);
        if divider > u32::from(u8::MAX) {
            return None;
        }
        let top = period_ticks / divider - 1;

        Some(Self {
            divider: divider as u8,
            top: top as u16,
            compare: ((top + 1) / 2) as u16,
        })
    }

    /// Frequency actually produced at `clock_hz`.
    pub fn frequency_hz(&self, clock_hz: u32) -> u32 {
        clock_hz / (u32::from(self.divider) * (u32::from(self.top) + 1))
    }
}

/// A PWM channel driving the buzzer.
///
/// Implemented by the firmware on top of the HAL's PWM slice.
pub trait ToneOutput {
    /// Error type of the underlying PWM peripheral.
    type Error;

    /// Input clock of the PWM counter, in Hz.
    fn clock_hz(&self) -> u32;

    /// Apply `timing` and enable the output.
    fn start(&mut self, timing: PwmTiming) -> Result<(), Self::Error>;

    /// Disable the output, leaving the pin low.
    fn stop(&mut self) -> Result<(), Self::Error>;
}

/// One note of a tone sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Pitch in Hz. `0` is a rest.
    pub frequency_hz: u32,
    /// Length of the note in milliseconds.
    pub duration_ms: u32,
}

impl Note {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    pub const fn rest(duration_ms: u32) -> Self {
        Self::new(0, duration_ms)
    }
}

/// Buzzer on a PWM output, timed with an async delay.
pub struct Buzzer<O, D> {
    output: O,
    delay: D,
}

impl<O, D> Buzzer<O, D>
where
    O: ToneOutput,
    D: DelayNs,
{
    /// Take ownership of the output and make sure it starts silent.
    pub fn new(mut output: O, delay: D) -> Result<Self, BuzzerError<O::Error>> {
        output.stop()?;
        Ok(Self { output, delay })
    }

    /// Sound `frequency_hz` for `duration_ms`, then go silent.
    ///
    /// A frequency of 0 is a rest: the output stays off and the call still
    /// takes `duration_ms`. Does not return before the note is over.
    ///
    /// # Errors
    /// * [`BuzzerError::UnsupportedFrequency`] if the PWM cannot reach the
    ///   pitch; nothing is played and no time is spent
    /// * [`BuzzerError::Output`] if the PWM rejects the change
    pub async fn play(
        &mut self,
        frequency_hz: u32,
        duration_ms: u32,
    ) -> Result<(), BuzzerError<O::Error>> {
        if frequency_hz == 0 {
            self.delay.delay_ms(duration_ms).await;
            return Ok(());
        }

        let timing = PwmTiming::for_frequency(self.output.clock_hz(), frequency_hz)
            .ok_or(BuzzerError::UnsupportedFrequency(frequency_hz))?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Tone {} Hz for {} ms ({})", frequency_hz, duration_ms, timing);

        self.output.start(timing)?;
        self.delay.delay_ms(duration_ms).await;
        self.output.stop()?;
        Ok(())
    }

    /// Play `notes` back to back. Stops at the first error.
    pub async fn play_sequence(&mut self, notes: &[Note]) -> Result<(), BuzzerError<O::Error>> {
        for note in notes {
            self.play(note.frequency_hz, note.duration_ms).await?;
        }
        Ok(())
    }

    /// Give back the output and the delay.
    pub fn release(self) -> (O, D) {
        (self.output, self.delay)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::cell::RefCell;
    use embassy_futures::block_on;
    use std::rc::Rc;
    use std::vec::Vec;

    const CLOCK_HZ: u32 = 125_000_000;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Start(PwmTiming),
        Stop,
        Delay(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct MockOutput {
        log: Log,
        fail_start: bool,
    }

    impl ToneOutput for MockOutput {
        type Error = ();

        fn clock_hz(&self) -> u32 {
            CLOCK_HZ
        }

        fn start(&mut self, timing: PwmTiming) -> Result<(), ()> {
            if self.fail_start {
                return Err(());
            }
            self.log.borrow_mut().push(Event::Start(timing));
            Ok(())
        }

        fn stop(&mut self) -> Result<(), ()> {
            self.log.borrow_mut().push(Event::Stop);
            Ok(())
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::Delay(ns / 1_000_000));
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::Delay(ms));
        }
    }

    fn buzzer(fail_start: bool) -> (Buzzer<MockOutput, MockDelay>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let output = MockOutput {
            log: log.clone(),
            fail_start,
        };
        let delay = MockDelay { log: log.clone() };
        let buzzer = Buzzer::new(output, delay).unwrap();
        log.borrow_mut().clear();
        (buzzer, log)
    }

    // ── PwmTiming ──

    #[test]
    fn low_tone_needs_a_divider() {
        let t = PwmTiming::for_frequency(CLOCK_HZ, 1000).unwrap();
        assert_eq!(t.divider, 2);
        assert_eq!(t.top, 62_499);
        assert_eq!(t.compare, 31_250);
        assert_eq!(t.frequency_hz(CLOCK_HZ), 1000);
    }

    #[test]
    fn high_tone_fits_without_divider() {
        let t = PwmTiming::for_frequency(CLOCK_HZ, 3000).unwrap();
        assert_eq!(t.divider, 1);
        assert_eq!(t.top, 41_665);
        assert_eq!(t.compare, 20_833);
    }

    #[test]
    fn shortest_period_still_toggles() {
        let t = PwmTiming::for_frequency(CLOCK_HZ, CLOCK_HZ / 2).unwrap();
        assert_eq!((t.divider, t.top, t.compare), (1, 1, 1));
    }

    #[test]
    fn out_of_range_frequencies_are_rejected() {
        assert_eq!(PwmTiming::for_frequency(CLOCK_HZ, 0), None);
        assert_eq!(PwmTiming::for_frequency(CLOCK_HZ, CLOCK_HZ), None);
        // 125 MHz / 7 Hz needs a divider above 255.
        assert_eq!(PwmTiming::for_frequency(CLOCK_HZ, 7), None);
        assert!(PwmTiming::for_frequency(CLOCK_HZ, 8).is_some());
    }

    // ── Buzzer ──

    #[test]
    fn new_silences_output() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let output = MockOutput {
            log: log.clone(),
            fail_start: false,
        };
        let _buzzer = Buzzer::new(output, MockDelay { log: log.clone() }).unwrap();
        assert_eq!(*log.borrow(), [Event::Stop]);
    }

    #[test]
    fn play_starts_holds_then_stops() {
        let (mut buzzer, log) = buzzer(false);
        block_on(buzzer.play(2000, 300)).unwrap();

        let timing = PwmTiming::for_frequency(CLOCK_HZ, 2000).unwrap();
        assert_eq!(
            *log.borrow(),
            [Event::Start(timing), Event::Delay(300), Event::Stop]
        );
    }

    #[test]
    fn zero_frequency_is_a_silent_rest() {
        let (mut buzzer, log) = buzzer(false);
        block_on(buzzer.play(0, 200)).unwrap();
        assert_eq!(*log.borrow(), [Event::Delay(200)]);
    }

    #[test]
    fn unsupported_frequency_plays_nothing() {
        let (mut buzzer, log) = buzzer(false);
        let result = block_on(buzzer.play(CLOCK_HZ, 100));
        assert!(matches!(result, Err(BuzzerError::UnsupportedFrequency(_))));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn output_error_is_propagated() {
        let (mut buzzer, _log) = buzzer(true);
        let result = block_on(buzzer.play(1000, 100));
        assert!(matches!(result, Err(BuzzerError::Output(()))));
    }

    #[test]
    fn sequence_plays_in_order() {
        let (mut buzzer, log) = buzzer(false);
        let notes = [Note::new(1000, 100), Note::rest(50), Note::new(3000, 100)];
        block_on(buzzer.play_sequence(&notes)).unwrap();

        let events = log.borrow();
        let delays: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                Event::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays, [100, 50, 100]);
        assert_eq!(events.iter().filter(|e| **e == Event::Stop).count(), 2);
    }
}
