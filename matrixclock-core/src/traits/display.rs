//! Matrix display trait
//!
//! The panel is addressed as two stacked halves of [`HALF_ROWS`] rows each;
//! a text row occupies one half. Game logic never touches raw LED indices,
//! only this interface.

use crate::config::{GRID_COLS, GRID_ROWS, HALF_ROWS};

/// Which half of the panel a draw call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Half {
    Top,
    Bottom,
}

/// Small fixed palette. The physical driver maps these to RGB values and
/// applies the ambient brightness curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Off,
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Orange,
    White,
}

/// Trait for the LED matrix adapter.
pub trait MatrixDisplay {
    /// Turn every pixel off.
    fn clear(&mut self);

    /// Set one pixel. `row` is relative to the half (0..[`HALF_ROWS`]).
    /// Out-of-range coordinates are ignored.
    fn set_pixel(&mut self, col: u8, row: u8, half: Half, color: Color);

    /// Draw up to [`TEXT_COLS`](crate::config::TEXT_COLS) characters,
    /// left-anchored, replacing the given half.
    fn draw_row(&mut self, half: Half, text: &str, color: Color);

    /// Push the current frame to the LEDs.
    fn flush(&mut self);
}

/// Convenience drawing helpers shared by the engines.
pub trait DisplayExt: MatrixDisplay {
    /// Set a pixel addressed by full-grid row (0..[`GRID_ROWS`]).
    fn pixel(&mut self, col: u8, row: u8, color: Color) {
        if row < HALF_ROWS {
            self.set_pixel(col, row, Half::Top, color);
        } else {
            self.set_pixel(col, row - HALF_ROWS, Half::Bottom, color);
        }
    }

    /// Fill the whole grid with one color.
    fn fill(&mut self, color: Color) {
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                self.pixel(col, row, color);
            }
        }
    }

    /// One-pixel border around the grid.
    fn border(&mut self, color: Color) {
        for col in 0..GRID_COLS {
            self.pixel(col, 0, color);
            self.pixel(col, GRID_ROWS - 1, color);
        }
        for row in 0..GRID_ROWS {
            self.pixel(0, row, color);
            self.pixel(GRID_COLS - 1, row, color);
        }
    }
}

// Blanket implementation for all MatrixDisplay types
impl<T: MatrixDisplay> DisplayExt for T {}
