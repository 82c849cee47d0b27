//! Snake engine
//!
//! Body segments live in a bounded vec with the head at index 0. Direction
//! changes are staged and applied at the next movement tick; a change that
//! would reverse the current heading is ignored there, which makes an
//! instant 180-degree self-collision impossible.

use heapless::Vec;

use super::Step;
use crate::config::{
    ramp_interval, FOOD_PLACE_RETRIES, GRID_COLS, GRID_ROWS, SNAKE_INTERVAL_STEP_MS, SNAKE_MAX_LEN,
    SNAKE_MIN_INTERVAL_MS, SNAKE_SPEEDUP_EVERY, SNAKE_START_INTERVAL_MS,
};
use crate::input::{Edges, Key};
use crate::rng::XorShift32;
use crate::traits::{Color, DisplayExt, MatrixDisplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Grid cell, column then row.
pub type Cell = (u8, u8);

#[derive(Debug)]
pub struct SnakeGame {
    /// Head at index 0.
    body: Vec<Cell, SNAKE_MAX_LEN>,
    heading: Direction,
    pending: Direction,
    food: Option<Cell>,
    interval_ms: u64,
    last_move_ms: u64,
    score: u16,
}

impl SnakeGame {
    pub fn new(now: u64, rng: &mut XorShift32) -> Self {
        let mut body = Vec::new();
        let row = GRID_ROWS / 2;
        let col = GRID_COLS / 2;
        // Three segments heading right; pushes cannot fail on an empty vec
        let _ = body.push((col, row));
        let _ = body.push((col - 1, row));
        let _ = body.push((col - 2, row));

        let mut game = Self {
            body,
            heading: Direction::Right,
            pending: Direction::Right,
            food: None,
            interval_ms: SNAKE_START_INTERVAL_MS,
            last_move_ms: now,
            score: 0,
        };
        game.place_food(rng);
        game
    }

    pub fn score(&self) -> u16 {
        self.score
    }

    /// Stage a direction change for the next movement tick.
    pub fn handle_input(&mut self, edges: &Edges) {
        if edges.pressed(Key::Up) {
            self.pending = Direction::Up;
        } else if edges.pressed(Key::Down) {
            self.pending = Direction::Down;
        } else if edges.pressed(Key::Left) {
            self.pending = Direction::Left;
        } else if edges.pressed(Key::Right) {
            self.pending = Direction::Right;
        }
    }

    pub fn advance(&mut self, now: u64, rng: &mut XorShift32) -> Step {
        if now.saturating_sub(self.last_move_ms) < self.interval_ms {
            return Step::Running;
        }
        self.last_move_ms = now;

        // A skipped placement from an earlier tick is retried here.
        if self.food.is_none() {
            self.place_food(rng);
        }

        // Apply the staged direction unless it reverses the heading.
        if self.pending != self.heading.opposite() {
            self.heading = self.pending;
        }

        let (dc, dr) = self.heading.delta();
        let head = self.body[0];
        let new_col = head.0 as i16 + dc;
        let new_row = head.1 as i16 + dr;
        if new_col < 0 || new_col >= GRID_COLS as i16 || new_row < 0 || new_row >= GRID_ROWS as i16
        {
            return Step::Died(self.score);
        }
        let new_head: Cell = (new_col as u8, new_row as u8);

        let eats = self.food == Some(new_head);
        let grows = eats && self.body.len() < SNAKE_MAX_LEN;

        // Self-collision: the cell the tail is about to vacate is fair
        // game unless we grow into it.
        let occupied = self.body.iter().enumerate().any(|(i, &cell)| {
            let is_vacating_tail = !grows && i == self.body.len() - 1;
            cell == new_head && !is_vacating_tail
        });
        if occupied {
            return Step::Died(self.score);
        }

        if !grows {
            self.body.pop();
        }
        // Cannot fail: either we popped, or grows guaranteed spare capacity
        let _ = self.body.insert(0, new_head);

        if eats {
            self.food = None;
            self.score = self.score.saturating_add(1);
            if self.score % SNAKE_SPEEDUP_EVERY == 0 {
                self.interval_ms = ramp_interval(
                    self.interval_ms,
                    SNAKE_INTERVAL_STEP_MS,
                    SNAKE_MIN_INTERVAL_MS,
                );
            }
            self.place_food(rng);
        }

        Step::Running
    }

    /// Uniform random probe over the grid, bounded retries. On exhaustion
    /// the placement is skipped; the next movement tick tries again.
    fn place_food(&mut self, rng: &mut XorShift32) {
        for _ in 0..FOOD_PLACE_RETRIES {
            let cell: Cell = (
                rng.below(GRID_COLS as u32) as u8,
                rng.below(GRID_ROWS as u32) as u8,
            );
            if !self.body.contains(&cell) {
                self.food = Some(cell);
                return;
            }
        }
    }

    pub fn draw<D: MatrixDisplay>(&self, display: &mut D) {
        display.clear();
        self.draw_body(display, Color::Green);
        if let Some((col, row)) = self.food {
            display.pixel(col, row, Color::Red);
        }
        if let Some(&(col, row)) = self.body.first() {
            display.pixel(col, row, Color::White);
        }
    }

    /// Death feedback: the whole body in one color, used by the
    /// controller's flash sequence.
    pub fn draw_body<D: MatrixDisplay>(&self, display: &mut D, color: Color) {
        for &(col, row) in self.body.iter() {
            display.pixel(col, row, color);
        }
    }

    #[cfg(test)]
    pub(crate) fn force_state(
        &mut self,
        body: &[Cell],
        heading: Direction,
        food: Option<Cell>,
    ) {
        self.body.clear();
        for &cell in body {
            self.body.push(cell).unwrap();
        }
        self.heading = heading;
        self.pending = heading;
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn body(&self) -> &[Cell] {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn heading(&self) -> Direction {
        self.heading
    }

    #[cfg(test)]
    pub(crate) fn food(&self) -> Option<Cell> {
        self.food
    }
}
