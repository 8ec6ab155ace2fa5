//! Shared state for the crossing traffic-light controller.
//!
//! See [`controller_state`] for the phase model, the shared cells and the
//! phase advancer task.

#![no_std]

pub mod controller_state;
