//! Traffic-light controller state shared between tasks.
//!
//! This module provides the [`ControllerState`] cells that every peripheral
//! task reads, the [`LightPhase`] model that drives all outputs, and the
//! [`PhaseAdvancer`] that sequences the phases.
//!
//! # Architecture
//!
//! Two fields are shared, each with exactly one writer:
//!
//! ```text
//! LightPhase  ← PhaseWriter (phase advancer task)   → LED, buzzer, display tasks
//! NightMode   ← button callback (debounced edge)    → every task
//! ```
//!
//! Each field lives in its own critical-section mutex, so reads and writes
//! are safe from both thread and interrupt context without assuming
//! word-atomic memory access. Single-writer access to the phase is enforced
//! by handing out exactly one [`PhaseWriter`].
//!
//! # Views
//!
//! Peripheral tasks never use the raw phase directly. Night mode remaps it:
//!
//! | Stored phase | Strip view (night) | Alert view (night) |
//! |--------------|--------------------|--------------------|
//! | Green        | NightBlink         | Yellow             |
//! | Yellow       | Yellow             | Yellow             |
//! | Red          | NightBlink         | Yellow             |
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. The optional `defmt` feature enables structured
//! logging and the `task` feature exposes the async phase advancer loop.

mod error;
mod indicator;
mod phase;
#[cfg(feature = "task")]
mod phase_task;
mod state;
mod timing;
mod tracker;

pub use error::StateError;
pub use indicator::{indicator_levels, IndicatorLevels, RgbIndicator};
pub use phase::LightPhase;
#[cfg(feature = "task")]
pub use phase_task::phase_advance_task;
pub use state::{ControllerState, PhaseWriter, StateSnapshot};
pub use timing::{PhaseAdvancer, PhaseTiming};
pub use tracker::ChangeTracker;

/// Poll interval shared by the LED, buzzer and display tasks.
pub const POLL_INTERVAL_MS: u64 = 10;
