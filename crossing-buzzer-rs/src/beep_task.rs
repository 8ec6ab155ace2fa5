//! Poll loop driving the buzzer from the controller state.

use crossing::controller_state::ControllerState;
use embassy_time::{Duration, Instant, Timer};
use embedded_hal_async::delay::DelayNs;

use crate::beeps::{BeepScheduler, BuzzerConfig};
use crate::tone::{Buzzer, ToneOutput};

/// Beep on every phase change and repeat while the phase lasts.
///
/// Playback holds this task for the length of the tone, so state changes
/// during a tone are seen on the first poll after it ends.
///
/// This is a regular `async fn`; wrap it in a concrete Embassy task.
pub async fn beep_task<O, D>(
    mut buzzer: Buzzer<O, D>,
    state: &'static ControllerState,
    config: BuzzerConfig,
) where
    O: ToneOutput,
    D: DelayNs,
{
    let mut scheduler = BeepScheduler::new(config.beeps);
    let period = Duration::from_millis(config.poll_interval_ms);

    #[cfg(feature = "defmt")]
    defmt::info!("Beep task started");

    loop {
        let snapshot = state.snapshot();
        if let Some(beep) = scheduler.poll(Instant::now(), snapshot) {
            if buzzer.play(beep.frequency_hz, beep.duration_ms).await.is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Beep at {} Hz failed", beep.frequency_hz);
            }
        }
        Timer::after(period).await;
    }
}
