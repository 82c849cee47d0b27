//! Dodge engine
//!
//! Blocks of width 1-3 fall from the top edge; the player slides along the
//! bottom row one cell per input edge. A block whose span covers the
//! player's column on arrival at the player's row ends the run; a block
//! that passes it cleanly retires for a point.

use super::Step;
use crate::config::{
    ramp_interval, DODGE_INTERVAL_STEP_MS, DODGE_MAX_BLOCK_WIDTH, DODGE_MIN_INTERVAL_MS,
    DODGE_PLAYER_ROW, DODGE_START_INTERVAL_MS, GRID_COLS,
};
use crate::input::{Edges, Key};
use crate::rng::XorShift32;
use crate::traits::{Color, DisplayExt, MatrixDisplay};

/// One falling block. `col` is the leftmost column of its span.
#[derive(Debug, Clone, Copy, Default)]
pub struct Block {
    col: u8,
    row: u8,
    width: u8,
    active: bool,
}

impl Block {
    fn covers(&self, col: u8) -> bool {
        self.active && col >= self.col && col < self.col + self.width
    }
}

#[derive(Debug)]
pub struct DodgeGame {
    player_col: u8,
    blocks: [Block; 2],
    interval_ms: u64,
    last_advance_ms: u64,
    score: u16,
}

impl DodgeGame {
    pub fn new(now: u64, rng: &mut XorShift32) -> Self {
        let mut game = Self {
            player_col: GRID_COLS / 2,
            blocks: [Block::default(); 2],
            interval_ms: DODGE_START_INTERVAL_MS,
            last_advance_ms: now,
            score: 0,
        };
        game.refill(rng);
        game
    }

    pub fn score(&self) -> u16 {
        self.score
    }

    /// One cell per edge, clamped to the grid.
    pub fn handle_input(&mut self, edges: &Edges) {
        if edges.pressed(Key::Left) && self.player_col > 0 {
            self.player_col -= 1;
        }
        if edges.pressed(Key::Right) && self.player_col < GRID_COLS - 1 {
            self.player_col += 1;
        }
    }

    pub fn advance(&mut self, now: u64, rng: &mut XorShift32) -> Step {
        if now.saturating_sub(self.last_advance_ms) < self.interval_ms {
            return Step::Running;
        }
        self.last_advance_ms = now;

        for i in 0..self.blocks.len() {
            if !self.blocks[i].active {
                continue;
            }
            self.blocks[i].row += 1;

            if self.blocks[i].row == DODGE_PLAYER_ROW {
                if self.blocks[i].covers(self.player_col) {
                    return Step::Died(self.score);
                }
            } else if self.blocks[i].row > DODGE_PLAYER_ROW {
                // Passed the player cleanly: retire, score, speed up
                self.blocks[i].active = false;
                self.score = self.score.saturating_add(1);
                self.interval_ms = ramp_interval(
                    self.interval_ms,
                    DODGE_INTERVAL_STEP_MS,
                    DODGE_MIN_INTERVAL_MS,
                );
            }
        }

        self.refill(rng);
        Step::Running
    }

    /// Score-driven concurrency policy: below 5 points one block, 5-14 a
    /// coin flip for a second, 15 and up always two.
    fn target_count(&self, rng: &mut XorShift32) -> usize {
        if self.score < 5 {
            1
        } else if self.score <= 14 {
            if rng.coin() {
                2
            } else {
                1
            }
        } else {
            2
        }
    }

    /// Top empty slots back up to the target immediately after advancing.
    fn refill(&mut self, rng: &mut XorShift32) {
        let target = self.target_count(rng);
        let mut active = self.blocks.iter().filter(|b| b.active).count();
        for block in self.blocks.iter_mut() {
            if active >= target {
                break;
            }
            if !block.active {
                let width = rng.range(1, DODGE_MAX_BLOCK_WIDTH as u32) as u8;
                let col = rng.below((GRID_COLS - width + 1) as u32) as u8;
                *block = Block {
                    col,
                    row: 0,
                    width,
                    active: true,
                };
                active += 1;
            }
        }
    }

    pub fn draw<D: MatrixDisplay>(&self, display: &mut D) {
        display.clear();
        display.pixel(self.player_col, DODGE_PLAYER_ROW, Color::Green);
        for block in self.blocks.iter().filter(|b| b.active) {
            for col in block.col..block.col + block.width {
                display.pixel(col, block.row, Color::Red);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, player_col: u8, score: u16, blocks: [Block; 2]) {
        self.player_col = player_col;
        self.score = score;
        self.blocks = blocks;
    }

    #[cfg(test)]
    pub(crate) fn block(col: u8, row: u8, width: u8) -> Block {
        Block {
            col,
            row,
            width,
            active: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn active_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.active).count()
    }
}
