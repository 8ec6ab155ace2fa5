//! Phase advancer task.

use embassy_time::{Instant, Timer};
use embedded_hal::digital::OutputPin;

use super::indicator::RgbIndicator;
use super::state::ControllerState;
use super::timing::{PhaseAdvancer, PhaseTiming};
use super::tracker::ChangeTracker;

/// Phase advancer loop: the only writer of the shared phase.
///
/// This is a regular `async fn`, not an Embassy `#[task]`; wrap it in a
/// concrete task in the firmware since Embassy tasks cannot be generic.
///
/// # Control flow
///
/// 1. Validate `timing` and take the [`PhaseWriter`](super::PhaseWriter).
/// 2. Loop:
///    - Read night mode, poll the [`PhaseAdvancer`] and publish any
///      transition.
///    - Drive the RGB indicator when `(phase, night_mode)` changed.
///    - Sleep until the phase deadline or one poll interval, whichever
///      comes first.
///
/// # Errors
///
/// * Invalid timing or a writer already taken: logs and **returns**.
/// * Indicator pin failure: logs and retries on the next wake-up.
pub async fn phase_advance_task<G, R>(
    state: &'static ControllerState,
    mut indicator: RgbIndicator<G, R>,
    timing: PhaseTiming,
) where
    G: OutputPin,
    R: OutputPin<Error = G::Error>,
{
    if let Err(_e) = timing.validate() {
        #[cfg(feature = "defmt")]
        defmt::error!("Phase timing rejected: {}", _e);
        return;
    }

    let mut writer = match state.take_phase_writer() {
        Ok(writer) => writer,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::error!("Phase advancer not started: {}", _e);
            return;
        }
    };

    let mut advancer = PhaseAdvancer::new(timing, Instant::now());
    writer.set(advancer.phase());
    let mut shown = ChangeTracker::new();

    #[cfg(feature = "defmt")]
    defmt::info!("Phase advancer started");

    loop {
        let night_mode = state.night_mode();

        if let Some(phase) = advancer.poll(Instant::now(), night_mode) {
            writer.set(phase);
            #[cfg(feature = "defmt")]
            defmt::debug!("Phase -> {} (night: {})", phase, night_mode);
        }

        let key = (advancer.phase(), night_mode);
        if shown.is_changed(key) {
            match indicator.show(key.0, key.1) {
                Ok(_) => shown.commit(key),
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("RGB indicator write failed");
                }
            }
        }

        Timer::at(advancer.next_wake(Instant::now(), night_mode)).await;
    }
}
