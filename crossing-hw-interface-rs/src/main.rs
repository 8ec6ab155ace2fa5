//! crossing-hw-interface
//!
//! Pedestrian crossing controller firmware for the Raspberry Pi Pico
//! (RP2040). Wires the library crates into five tasks sharing one
//! `ControllerState`:
//!
//! 1. The phase task cycles Green → Yellow → Red and drives the RGB
//!    indicator.
//! 2. The button task debounces both buttons; button A toggles night mode.
//! 3. The LED task paints the 5×5 matrix in the phase colour.
//! 4. The beep task sounds the buzzer on every phase change and repeats
//!    while the phase lasts.
//! 5. The OLED task shows the pedestrian instruction.

#![no_std]
#![no_main]

use core::convert::Infallible;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, PIO0};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{self, Pwm};
use embassy_time::Delay;
use smart_leds::RGB8;
use {defmt_rtt as _, panic_probe as _};

use button_driver::{button_task, DebounceConfig, EdgeDebouncer};
use buzzer_driver::{beep_task, Buzzer, BuzzerConfig, PwmTiming, ToneOutput};
use crossing::controller_state::{
    phase_advance_task, ControllerState, PhaseTiming, RgbIndicator,
};
use crossing_oled_display_rs::{display_update_task, DisplayConfig, OledDriver};
use led_strip_driver::{strip_update_task, unpack_grb, LedStrip, LedStripConfig, LedWire};

// ---------------------------------------------------------------------------
// Interrupt binding
// ---------------------------------------------------------------------------

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Phase and night mode, shared by every task and the button callback.
static STATE: ControllerState = ControllerState::new();

const LED_COUNT: usize = 25;
const BUTTON_A: u8 = 5;
const BUTTON_B: u8 = 6;
const I2C_FREQUENCY_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

type OledI2c = I2c<'static, I2C1, i2c::Async>;
type Indicator = RgbIndicator<Output<'static>, Output<'static>>;

// ---------------------------------------------------------------------------
// Hardware adapters
// ---------------------------------------------------------------------------

/// WS2812 strip on a PIO state machine.
///
/// `PioWs2812` takes colours and repacks them as GRB itself, so the words
/// are converted back with `unpack_grb`. The bitstream is the same one the
/// words describe.
struct PioWire {
    ws2812: PioWs2812<'static, PIO0, 0, LED_COUNT>,
}

impl LedWire for PioWire {
    type Error = Infallible;

    async fn write(&mut self, words: &[u32]) -> Result<(), Infallible> {
        let mut frame = [RGB8::default(); LED_COUNT];
        for (color, &word) in frame.iter_mut().zip(words) {
            *color = unpack_grb(word);
        }
        self.ws2812.write(&frame).await;
        Ok(())
    }
}

/// Buzzer on channel B of a PWM slice.
struct PwmTone {
    pwm: Pwm<'static>,
    config: pwm::Config,
}

impl ToneOutput for PwmTone {
    type Error = Infallible;

    fn clock_hz(&self) -> u32 {
        clk_sys_freq()
    }

    fn start(&mut self, timing: PwmTiming) -> Result<(), Infallible> {
        self.config.divider = timing.divider.into();
        self.config.top = timing.top;
        self.config.compare_b = timing.compare;
        self.config.enable = true;
        self.pwm.set_config(&self.config);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Infallible> {
        // A zero compare holds the pin low; a disabled slice would freeze it
        // at whatever level it had.
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Button callback
// ---------------------------------------------------------------------------

fn on_button(pin: u8) {
    match pin {
        BUTTON_A => {
            let night_mode = STATE.toggle_night_mode();
            info!("Night mode {}", if night_mode { "on" } else { "off" });
        }
        _ => debug!("Button {} has no action", pin),
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

// Thin wrappers that monomorphise the generic library loops so they can be
// spawned as concrete Embassy tasks.

#[embassy_executor::task]
async fn phase_task(indicator: Indicator, timing: PhaseTiming) {
    phase_advance_task(&STATE, indicator, timing).await;
}

#[embassy_executor::task]
async fn buttons_task(pins: [(u8, Input<'static>); 2], debouncer: EdgeDebouncer<2>) {
    button_task(pins, debouncer).await;
}

#[embassy_executor::task]
async fn led_task(strip: LedStrip<PioWire, LED_COUNT>, config: LedStripConfig) {
    strip_update_task(strip, &STATE, config).await;
}

#[embassy_executor::task]
async fn buzzer_task(buzzer: Buzzer<PwmTone, Delay>, config: BuzzerConfig) {
    beep_task(buzzer, &STATE, config).await;
}

#[embassy_executor::task]
async fn oled_task(driver: OledDriver<OledI2c>, config: DisplayConfig) {
    display_update_task(driver, &STATE, config).await;
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("crossing-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // OLED SDA   → GP14  I2C1, 400 kHz
    // OLED SCL   → GP15
    // BUTTON_A   → GP5   pull-up, falling edge: night mode toggle
    // BUTTON_B   → GP6   pull-up, falling edge: no action
    // LED_MATRIX → GP7   WS2812 5×5, PIO0 SM0
    // BUZZER     → GP21  PWM slice 2, channel B
    // RGB_GREEN  → GP11
    // RGB_RED    → GP13
    // ———————————————————————————————————————————————————————————————————————

    // —— OLED ——————————————————————————————————————————————————————————————
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C1, p.PIN_15, p.PIN_14, Irqs, i2c_config);

    let display_config = DisplayConfig::default();
    let oled_driver = unwrap!(
        OledDriver::new(i2c, &display_config).ok(),
        "Invalid display configuration"
    );

    // —— LED matrix ————————————————————————————————————————————————————————
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &program);
    let strip = unwrap!(
        LedStrip::init(PioWire { ws2812 }, Delay).await.ok(),
        "LED strip init failed"
    );

    // —— Buzzer ————————————————————————————————————————————————————————————
    let pwm_config = pwm::Config::default();
    let pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, pwm_config.clone());
    let buzzer = unwrap!(
        Buzzer::new(
            PwmTone {
                pwm,
                config: pwm_config,
            },
            Delay,
        )
        .ok(),
        "Buzzer init failed"
    );

    // —— Buttons ———————————————————————————————————————————————————————————
    let mut debouncer = EdgeDebouncer::new(DebounceConfig::default());
    debouncer.set_callback(on_button);
    unwrap!(debouncer.configure(BUTTON_A));
    unwrap!(debouncer.configure(BUTTON_B));
    let buttons = [
        (BUTTON_A, Input::new(p.PIN_5, Pull::Up)),
        (BUTTON_B, Input::new(p.PIN_6, Pull::Up)),
    ];

    // —— RGB indicator —————————————————————————————————————————————————————
    let indicator = RgbIndicator::new(
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_13, Level::Low),
    );

    // —— Spawn tasks ———————————————————————————————————————————————————————
    spawner.spawn(unwrap!(phase_task(indicator, PhaseTiming::default())));
    spawner.spawn(unwrap!(buttons_task(buttons, debouncer)));
    spawner.spawn(unwrap!(led_task(strip, LedStripConfig::default())));
    spawner.spawn(unwrap!(buzzer_task(buzzer, BuzzerConfig::default())));
    spawner.spawn(unwrap!(oled_task(oled_driver, display_config)));

    info!("All tasks spawned");
}
