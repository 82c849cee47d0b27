//! Settings menu and time/date editors
//!
//! The menu cycles over four items; picking Time or Date stages the current
//! real-time values into an editor that walks its fields one confirm at a
//! time and commits everything in a single write at the end. Cancelling at
//! any point discards the staged copy.

pub mod edit;
pub mod menu;

pub use edit::{DateEdit, TimeEdit};
pub use menu::{MenuItem, SettingsMenu};
