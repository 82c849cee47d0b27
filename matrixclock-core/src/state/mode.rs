//! Mode sum type
//!
//! Each variant carries only the state that mode needs, so stale game or
//! edit state cannot exist while another mode is active. Switching away
//! from a mode drops its in-flight state; there is nothing to cancel.

use crate::config::{EDIT_TIMEOUT_MS, GAME_TIMEOUT_MS, SELECT_TIMEOUT_MS, SETTINGS_TIMEOUT_MS};
use crate::games::{DodgeGame, GameKind, RunnerGame, SnakeGame};
use crate::settings::{DateEdit, SettingsMenu, TimeEdit};

/// Selection cursor for the game-select screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelectState {
    pub selected: GameKind,
}

impl SelectState {
    pub fn new() -> Self {
        Self {
            selected: GameKind::Runner,
        }
    }

    pub fn cycle(&mut self, forward: bool) {
        let len = GameKind::ALL.len();
        let idx = GameKind::ALL
            .iter()
            .position(|&k| k == self.selected)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        self.selected = GameKind::ALL[next];
    }
}

impl Default for SelectState {
    fn default() -> Self {
        Self::new()
    }
}

/// The active mode and its state.
#[derive(Debug)]
pub enum Mode {
    Clock,
    GameSelect(SelectState),
    Settings(SettingsMenu),
    SetTime(TimeEdit),
    SetDate(DateEdit),
    Runner(RunnerGame),
    Dodge(DodgeGame),
    Snake(SnakeGame),
}

/// Stateless discriminant of [`Mode`], for policy tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeKind {
    Clock,
    GameSelect,
    Settings,
    SetTime,
    SetDate,
    Runner,
    Dodge,
    Snake,
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Clock => ModeKind::Clock,
            Mode::GameSelect(_) => ModeKind::GameSelect,
            Mode::Settings(_) => ModeKind::Settings,
            Mode::SetTime(_) => ModeKind::SetTime,
            Mode::SetDate(_) => ModeKind::SetDate,
            Mode::Runner(_) => ModeKind::Runner,
            Mode::Dodge(_) => ModeKind::Dodge,
            Mode::Snake(_) => ModeKind::Snake,
        }
    }
}

impl ModeKind {
    /// Idle window after which the mode falls back to Clock; Clock itself
    /// never times out.
    pub fn idle_timeout_ms(self) -> Option<u64> {
        match self {
            ModeKind::Clock => None,
            ModeKind::GameSelect => Some(SELECT_TIMEOUT_MS),
            ModeKind::Settings => Some(SETTINGS_TIMEOUT_MS),
            ModeKind::SetTime | ModeKind::SetDate => Some(EDIT_TIMEOUT_MS),
            ModeKind::Runner | ModeKind::Dodge | ModeKind::Snake => Some(GAME_TIMEOUT_MS),
        }
    }

    /// Games idle against the game activity timestamp; everything else
    /// uses the general one. Kept as two clocks on purpose.
    pub fn uses_game_activity(self) -> bool {
        self.is_game()
    }

    pub fn is_game(self) -> bool {
        matches!(self, ModeKind::Runner | ModeKind::Dodge | ModeKind::Snake)
    }

    /// Modes in which a long button hold completes into a Long gesture.
    pub fn long_hold_allowed(self) -> bool {
        matches!(
            self,
            ModeKind::GameSelect | ModeKind::Settings | ModeKind::SetTime | ModeKind::SetDate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_never_times_out() {
        assert_eq!(ModeKind::Clock.idle_timeout_ms(), None);
    }

    #[test]
    fn test_timeout_windows() {
        assert_eq!(ModeKind::GameSelect.idle_timeout_ms(), Some(SELECT_TIMEOUT_MS));
        assert_eq!(ModeKind::Settings.idle_timeout_ms(), Some(SETTINGS_TIMEOUT_MS));
        assert_eq!(ModeKind::SetTime.idle_timeout_ms(), Some(EDIT_TIMEOUT_MS));
        assert_eq!(ModeKind::Snake.idle_timeout_ms(), Some(GAME_TIMEOUT_MS));
    }

    #[test]
    fn test_only_games_use_game_activity() {
        for kind in [ModeKind::Runner, ModeKind::Dodge, ModeKind::Snake] {
            assert!(kind.uses_game_activity());
        }
        for kind in [
            ModeKind::Clock,
            ModeKind::GameSelect,
            ModeKind::Settings,
            ModeKind::SetTime,
            ModeKind::SetDate,
        ] {
            assert!(!kind.uses_game_activity());
        }
    }

    #[test]
    fn test_long_hold_only_in_editing_modes() {
        assert!(ModeKind::Settings.long_hold_allowed());
        assert!(ModeKind::GameSelect.long_hold_allowed());
        assert!(ModeKind::SetTime.long_hold_allowed());
        assert!(ModeKind::SetDate.long_hold_allowed());
        assert!(!ModeKind::Clock.long_hold_allowed());
        assert!(!ModeKind::Snake.long_hold_allowed());
    }

    #[test]
    fn test_select_cycles_mod_three() {
        let mut sel = SelectState::new();
        sel.cycle(true);
        assert_eq!(sel.selected, GameKind::Dodge);
        sel.cycle(true);
        assert_eq!(sel.selected, GameKind::Snake);
        sel.cycle(true);
        assert_eq!(sel.selected, GameKind::Runner);
        sel.cycle(false);
        assert_eq!(sel.selected, GameKind::Snake);
    }
}
