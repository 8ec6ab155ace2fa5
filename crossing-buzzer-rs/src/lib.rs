//! Tone generator for a passive piezo buzzer.
//!
//! # Architecture
//!
//! - **[`ToneOutput`]** — the hardware seam: a PWM channel that can start a
//!   square wave and go back to a low idle level.
//! - **[`Buzzer`]** — plays `(frequency, duration)` notes on a
//!   [`ToneOutput`], holding the caller for each note.
//! - **[`BeepScheduler`]** — decides, from the shared controller state,
//!   when the crossing should beep and with which tone.
//! - **`beep_task`** *(feature `task`)* — the poll loop tying both together.
//!
//! # Blocking contract
//!
//! [`Buzzer::play`] does not return until the note has finished. The task
//! that owns the buzzer is unavailable for that long; it must have no other
//! job.
//!
//! # Features
//!
//! - **`defmt`** — logging and [`defmt::Format`] on public types.
//! - **`task`** — the async `beep_task` loop.

#![no_std]

mod beeps;
#[cfg(feature = "task")]
mod beep_task;
mod error;
mod tone;

pub use beeps::{Beep, BeepScheduler, BeepTable, BuzzerConfig};
#[cfg(feature = "task")]
pub use beep_task::beep_task;
pub use error::BuzzerError;
pub use tone::{Buzzer, Note, PwmTiming, ToneOutput};
