//! Runner engine
//!
//! A single obstacle scrolls left along a one-dimensional lane toward a
//! player with two vertical states, ground and air. A ground obstacle hits
//! a grounded player, an air obstacle hits a jumping one; mismatched state
//! is always safe.

use super::Step;
use crate::config::{
    ramp_interval, GRID_COLS, RUNNER_AIR_ROW, RUNNER_GROUND_ROW, RUNNER_INTERVAL_STEP_MS,
    RUNNER_JUMP_MS, RUNNER_MIN_INTERVAL_MS, RUNNER_PLAYER_COL, RUNNER_START_INTERVAL_MS,
};
use crate::input::{Edges, Key};
use crate::rng::XorShift32;
use crate::traits::{Color, DisplayExt, MatrixDisplay};

/// Hazard type of the current obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObstacleKind {
    /// Hits a grounded player; jump over it.
    Ground,
    /// Hits a jumping player; stay down.
    Air,
}

#[derive(Debug)]
pub struct RunnerGame {
    jumping: bool,
    jump_started_ms: u64,
    obstacle_col: u8,
    obstacle: ObstacleKind,
    interval_ms: u64,
    last_advance_ms: u64,
    score: u16,
}

impl RunnerGame {
    pub fn new(now: u64, rng: &mut XorShift32) -> Self {
        Self {
            jumping: false,
            jump_started_ms: 0,
            obstacle_col: GRID_COLS - 1,
            obstacle: random_kind(rng),
            interval_ms: RUNNER_START_INTERVAL_MS,
            last_advance_ms: now,
            score: 0,
        }
    }

    pub fn score(&self) -> u16 {
        self.score
    }

    /// Accept a jump request. Inputs while already airborne are ignored.
    pub fn handle_input(&mut self, edges: &Edges, now: u64) {
        let wants_jump = edges.pressed(Key::Up) || edges.pressed(Key::Ok);
        if wants_jump && !self.jumping {
            self.jumping = true;
            self.jump_started_ms = now;
        }
    }

    pub fn advance(&mut self, now: u64, rng: &mut XorShift32) -> Step {
        // The jump ends on its own timer, independent of the frame gate
        // and of any further input.
        if self.jumping && now.saturating_sub(self.jump_started_ms) >= RUNNER_JUMP_MS {
            self.jumping = false;
        }

        // Checked every tick, not just on frame advances: a jump that runs
        // out while the obstacle sits on the player's column still kills.
        if self.collides() {
            return Step::Died(self.score);
        }

        if now.saturating_sub(self.last_advance_ms) < self.interval_ms {
            return Step::Running;
        }
        self.last_advance_ms = now;

        if self.obstacle_col == 0 {
            // Survived this obstacle: score, speed up, respawn at the
            // right edge with a fresh random hazard type.
            self.score = self.score.saturating_add(1);
            self.interval_ms = ramp_interval(
                self.interval_ms,
                RUNNER_INTERVAL_STEP_MS,
                RUNNER_MIN_INTERVAL_MS,
            );
            self.obstacle_col = GRID_COLS - 1;
            self.obstacle = random_kind(rng);
        } else {
            self.obstacle_col -= 1;
        }

        if self.collides() {
            return Step::Died(self.score);
        }

        Step::Running
    }

    /// Hazard type must match the player's vertical state at the shared
    /// column; same column with mismatched state is safe.
    fn collides(&self) -> bool {
        if self.obstacle_col != RUNNER_PLAYER_COL {
            return false;
        }
        match self.obstacle {
            ObstacleKind::Ground => !self.jumping,
            ObstacleKind::Air => self.jumping,
        }
    }

    pub fn draw<D: MatrixDisplay>(&self, display: &mut D) {
        display.clear();

        // Ground line
        for col in 0..GRID_COLS {
            display.pixel(col, RUNNER_GROUND_ROW + 1, Color::Blue);
        }

        let player_row = if self.jumping {
            RUNNER_AIR_ROW
        } else {
            RUNNER_GROUND_ROW
        };
        display.pixel(RUNNER_PLAYER_COL, player_row, Color::Green);
        display.pixel(RUNNER_PLAYER_COL, player_row - 1, Color::Green);

        let (obstacle_row, color) = match self.obstacle {
            ObstacleKind::Ground => (RUNNER_GROUND_ROW, Color::Red),
            ObstacleKind::Air => (RUNNER_AIR_ROW, Color::Yellow),
        };
        display.pixel(self.obstacle_col, obstacle_row, color);
        display.pixel(self.obstacle_col, obstacle_row - 1, color);
    }

    #[cfg(test)]
    pub(crate) fn force_obstacle(&mut self, col: u8, kind: ObstacleKind) {
        self.obstacle_col = col;
        self.obstacle = kind;
    }

    #[cfg(test)]
    pub(crate) fn is_jumping(&self) -> bool {
        self.jumping
    }
}

fn random_kind(rng: &mut XorShift32) -> ObstacleKind {
    if rng.coin() {
        ObstacleKind::Air
    } else {
        ObstacleKind::Ground
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::edges;

    fn edges_for(key: Key) -> Edges {
        edges(&[key])
    }

    fn game_at(col: u8, kind: ObstacleKind) -> (RunnerGame, XorShift32) {
        let mut rng = XorShift32::new(7);
        let mut game = RunnerGame::new(0, &mut rng);
        game.force_obstacle(col, kind);
        (game, rng)
    }

    #[test]
    fn test_frame_gate_holds_obstacle() {
        let (mut game, mut rng) = game_at(20, ObstacleKind::Ground);
        assert_eq!(game.advance(RUNNER_START_INTERVAL_MS - 1, &mut rng), Step::Running);
        assert_eq!(game.obstacle_col, 20);
        game.advance(RUNNER_START_INTERVAL_MS, &mut rng);
        assert_eq!(game.obstacle_col, 19);
    }

    #[test]
    fn test_ground_obstacle_hits_grounded_player() {
        let (mut game, mut rng) = game_at(RUNNER_PLAYER_COL + 1, ObstacleKind::Ground);
        let step = game.advance(RUNNER_START_INTERVAL_MS, &mut rng);
        assert_eq!(step, Step::Died(0));
    }

    #[test]
    fn test_ground_obstacle_misses_airborne_player() {
        let (mut game, mut rng) = game_at(RUNNER_PLAYER_COL + 1, ObstacleKind::Ground);
        game.handle_input(&edges_for(Key::Up), RUNNER_START_INTERVAL_MS - 10);
        let step = game.advance(RUNNER_START_INTERVAL_MS, &mut rng);
        assert_eq!(step, Step::Running);
    }

    #[test]
    fn test_air_obstacle_hits_airborne_player() {
        let (mut game, mut rng) = game_at(RUNNER_PLAYER_COL + 1, ObstacleKind::Air);
        game.handle_input(&edges_for(Key::Up), RUNNER_START_INTERVAL_MS - 10);
        let step = game.advance(RUNNER_START_INTERVAL_MS, &mut rng);
        assert_eq!(step, Step::Died(0));
    }

    #[test]
    fn test_air_obstacle_misses_grounded_player() {
        let (mut game, mut rng) = game_at(RUNNER_PLAYER_COL + 1, ObstacleKind::Air);
        let step = game.advance(RUNNER_START_INTERVAL_MS, &mut rng);
        assert_eq!(step, Step::Running);
    }

    #[test]
    fn test_jump_auto_ends_and_ignores_input_while_airborne() {
        let mut rng = XorShift32::new(7);
        let mut game = RunnerGame::new(0, &mut rng);
        game.handle_input(&edges_for(Key::Up), 100);
        assert!(game.is_jumping());
        let start = game.jump_started_ms;

        // A second press mid-air does not restart the jump timer
        game.handle_input(&edges_for(Key::Ok), 300);
        assert_eq!(game.jump_started_ms, start);

        game.advance(100 + RUNNER_JUMP_MS, &mut rng);
        assert!(!game.is_jumping());
    }

    #[test]
    fn test_retiring_obstacle_scores_and_speeds_up() {
        let (mut game, mut rng) = game_at(0, ObstacleKind::Ground);
        let step = game.advance(RUNNER_START_INTERVAL_MS, &mut rng);
        assert_eq!(step, Step::Running);
        assert_eq!(game.score(), 1);
        assert_eq!(
            game.interval_ms,
            RUNNER_START_INTERVAL_MS - RUNNER_INTERVAL_STEP_MS
        );
        assert_eq!(game.obstacle_col, GRID_COLS - 1);
    }

    #[test]
    fn test_interval_never_goes_below_floor() {
        let mut rng = XorShift32::new(7);
        let mut game = RunnerGame::new(0, &mut rng);
        game.interval_ms = RUNNER_MIN_INTERVAL_MS;
        game.force_obstacle(0, ObstacleKind::Ground);
        game.advance(RUNNER_START_INTERVAL_MS, &mut rng);
        assert_eq!(game.interval_ms, RUNNER_MIN_INTERVAL_MS);
    }
}
