//! Board-agnostic core logic for the matrixclock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (matrix display, non-volatile store,
//!   time source, equation generator)
//! - Edge-detecting input dispatcher and button gesture tracker
//! - Mode state machine (clock, game select, settings, editors, games)
//! - The three game engines (runner, dodge, snake)
//! - High-score persistence policy
//! - The cooperative per-tick controller loop
//!
//! Everything here runs single-threaded and allocation-free; the firmware
//! crate feeds it input samples and a millisecond timestamp once per tick.

#![no_std]
#![deny(unsafe_code)]

// Host-side tests (proptest) need std
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod clock;
pub mod config;
pub mod controller;
pub mod games;
pub mod input;
pub mod rng;
pub mod scores;
pub mod settings;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
