//! Edge-waiting loop feeding the debouncer.

use embassy_futures::select::select_array;
use embassy_time::Instant;
use embedded_hal_async::digital::Wait;

use crate::edge_input::EdgeDebouncer;

/// Wait for falling edges on `pins` and report them to `debouncer`.
///
/// Each entry pairs the pin number used for registration with the input
/// (pulled-up, as created by the HAL). Pins that were not registered with
/// [`EdgeDebouncer::configure`] are ignored by the debouncer.
///
/// This is a regular `async fn`; wrap it in a concrete Embassy task.
///
/// # Errors
///
/// A failed edge wait is logged and the loop keeps waiting.
pub async fn button_task<P, const N: usize>(
    mut pins: [(u8, P); N],
    mut debouncer: EdgeDebouncer<N>,
) where
    P: Wait,
{
    #[cfg(feature = "defmt")]
    defmt::info!("Button task started ({} pins)", N);

    loop {
        let (result, slot) =
            select_array(pins.each_mut().map(|(_, input)| input.wait_for_falling_edge())).await;
        let pin = pins[slot].0;

        if result.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Edge wait failed on pin {}", pin);
            continue;
        }

        if debouncer.on_event(pin, Instant::now()) {
            #[cfg(feature = "defmt")]
            defmt::debug!("Button {} pressed", pin);
        }
    }
}
