//! Debounced push-button input.
//!
//! This crate turns raw falling-edge events from pulled-up button pins into
//! clean, debounced presses delivered to a single callback.
//!
//! # Architecture
//!
//! - **[`DebounceGuard`]** — last accepted timestamp plus a re-arm interval.
//! - **[`EdgeDebouncer`]** — registered pins, the guard(s) and the callback.
//!   One guard can serve all pins ([`DebounceScope::Shared`]) or each pin
//!   can have its own ([`DebounceScope::PerPin`]).
//! - **`button_task`** *(feature `task`)* — waits for a falling edge on any
//!   pin and feeds it to the debouncer.
//!
//! # Quick start
//!
//! ```
//! use button_driver::{DebounceConfig, EdgeDebouncer};
//! use embassy_time::Instant;
//!
//! fn on_press(pin: u8) {
//!     let _ = pin;
//! }
//!
//! let mut buttons: EdgeDebouncer<2> = EdgeDebouncer::new(DebounceConfig::default());
//! buttons.set_callback(on_press);
//! buttons.configure(5).unwrap();
//!
//! assert!(buttons.on_event(5, Instant::from_millis(1000)));
//! assert!(!buttons.on_event(5, Instant::from_millis(1050))); // bounce
//! ```
//!
//! # Features
//!
//! - **`defmt`** — logging and [`defmt::Format`] on public types.
//! - **`task`** — the async `button_task` loop.

#![no_std]

#[cfg(feature = "task")]
mod button_task;
mod debounce;
mod edge_input;
mod error;

#[cfg(feature = "task")]
pub use button_task::button_task;
pub use debounce::{DebounceConfig, DebounceGuard, DebounceScope};
pub use edge_input::{ButtonCallback, EdgeDebouncer};
pub use error::ButtonError;
