//! Mode state machine
//!
//! Defines the authoritative runtime behavior of the device. Exactly one
//! mode is active at any instant; the controller is its single writer.

pub mod mode;

pub use mode::{Mode, ModeKind, SelectState};
