//! Physical button gesture tracker
//!
//! One press yields at most one semantic event:
//!
//! - *short*: released before [`SHORT_PRESS_MAX_MS`] without the medium
//!   threshold having fired
//! - *medium*: fires immediately while still held, once, when the hold
//!   crosses [`MEDIUM_HOLD_MS`]
//! - *long*: fires on release, only if medium already fired, the hold also
//!   crossed [`LONG_HOLD_MS`], and the active mode accepts long holds
//!
//! Any other combination (e.g. medium fired but released before the long
//! threshold) fires nothing.

use crate::config::{LONG_HOLD_MS, MEDIUM_HOLD_MS, SHORT_PRESS_MAX_MS};

/// Completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Short,
    Medium,
    Long,
}

/// Press-duration state machine, updated once per tick with the sampled
/// level.
#[derive(Debug, Default)]
pub struct ButtonTracker {
    down: bool,
    pressed_at_ms: u64,
    medium_fired: bool,
}

impl ButtonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample. `long_allowed` reflects whether the active mode is
    /// one of the editing modes that accept a long hold.
    pub fn update(&mut self, pressed: bool, now: u64, long_allowed: bool) -> Option<ButtonEvent> {
        if pressed && !self.down {
            // Press start
            self.down = true;
            self.pressed_at_ms = now;
            self.medium_fired = false;
            return None;
        }

        if pressed {
            // Still held: medium fires exactly once
            if !self.medium_fired && now.saturating_sub(self.pressed_at_ms) >= MEDIUM_HOLD_MS {
                self.medium_fired = true;
                return Some(ButtonEvent::Medium);
            }
            return None;
        }

        if self.down {
            // Release: classify the completed press
            self.down = false;
            let held = now.saturating_sub(self.pressed_at_ms);
            if self.medium_fired && held >= LONG_HOLD_MS && long_allowed {
                return Some(ButtonEvent::Long);
            }
            if !self.medium_fired && held < SHORT_PRESS_MAX_MS {
                return Some(ButtonEvent::Short);
            }
        }

        None
    }
}
