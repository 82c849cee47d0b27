//! Clock face
//!
//! Shows the hour and minute as two arithmetic puzzles, one per half,
//! regenerated whenever the displayed minute changes. Two corner pixels
//! blink against the seconds; they are the only pixels the clock path
//! addresses directly.

use heapless::String;

use crate::config::{EQUATION_LEN, GRID_COLS, HALF_ROWS};
use crate::traits::{Board, Color, EquationSource, Half, MatrixDisplay, TimeSource};

#[derive(Debug, Default)]
pub struct ClockFace {
    /// Hour/minute currently rendered, None when a redraw is forced.
    shown: Option<(u8, u8)>,
}

impl ClockFace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a full redraw on the next update (mode re-entry).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    pub fn update<B: Board>(&mut self, board: &mut B, difficulty: u8) {
        // On a transient read failure keep showing the last face; boot
        // already handled the chip-missing case.
        let Ok(now) = board.rtc().now() else {
            return;
        };

        if self.shown != Some((now.hour, now.minute)) {
            self.shown = Some((now.hour, now.minute));

            let mut hour_eq: String<EQUATION_LEN> = String::new();
            let mut minute_eq: String<EQUATION_LEN> = String::new();
            board.equations().equation(now.hour, difficulty, &mut hour_eq);
            board.equations().equation(now.minute, difficulty, &mut minute_eq);

            let display = board.display();
            display.clear();
            display.draw_row(Half::Top, &hour_eq, Color::Red);
            display.draw_row(Half::Bottom, &minute_eq, Color::Green);
        }

        // Seconds indicator, poked directly
        let on = now.second % 2 == 0;
        let display = board.display();
        let color = if on { Color::Blue } else { Color::Off };
        display.set_pixel(GRID_COLS - 1, 0, Half::Top, color);
        display.set_pixel(GRID_COLS - 1, HALF_ROWS - 1, Half::Bottom, color);
    }
}
