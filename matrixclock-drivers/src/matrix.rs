//! Matrix framebuffer
//!
//! Logical framebuffer behind the core's `MatrixDisplay` trait. Text is
//! rendered with the embedded-graphics 4x6 font through a `DrawTarget`
//! implementation; [`MatrixFrame::iter_leds`] walks the pixels in the
//! column-serpentine order of a WS2812 chain so the platform can push the
//! frame out unchanged.
//!
//! `flush` is a no-op here: the owner of the physical chain wraps this
//! type and pushes the frame itself.

use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use matrixclock_core::config::{GRID_COLS, GRID_ROWS, HALF_ROWS};
use matrixclock_core::traits::{Color, Half, MatrixDisplay};

const COLS: usize = GRID_COLS as usize;
const ROWS: usize = GRID_ROWS as usize;

/// Pixel count of the whole chain.
pub const NUM_LEDS: usize = COLS * ROWS;

fn color_rgb(color: Color) -> [u8; 3] {
    match color {
        Color::Off => [0, 0, 0],
        Color::Red => [255, 0, 0],
        Color::Green => [0, 255, 0],
        Color::Blue => [0, 0, 255],
        Color::Yellow => [255, 200, 0],
        Color::Cyan => [0, 220, 220],
        Color::Orange => [255, 96, 0],
        Color::White => [255, 255, 255],
    }
}

/// Chain position of a logical pixel. Panels are wired in vertical
/// serpentine columns: even columns run top-down, odd columns bottom-up.
pub fn led_index(col: u8, row: u8) -> usize {
    let col = col as usize;
    let row = row as usize;
    if col % 2 == 0 {
        col * ROWS + row
    } else {
        col * ROWS + (ROWS - 1 - row)
    }
}

pub struct MatrixFrame {
    /// Logical [row][col] RGB buffer.
    pixels: [[[u8; 3]; COLS]; ROWS],
    /// Global brightness scale, applied on readout. The light-sensor
    /// curve lives outside; this is just the knob it turns.
    brightness: u8,
}

impl Default for MatrixFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixFrame {
    pub fn new() -> Self {
        Self {
            pixels: [[[0; 3]; COLS]; ROWS],
            brightness: 255,
        }
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Full-grid readback, mostly for tests and simulators.
    pub fn pixel_rgb(&self, col: u8, row: u8) -> [u8; 3] {
        self.pixels[row as usize][col as usize]
    }

    fn put(&mut self, col: u8, row: u8, rgb: [u8; 3]) {
        if col < GRID_COLS && row < GRID_ROWS {
            self.pixels[row as usize][col as usize] = rgb;
        }
    }

    /// Pixels in chain order with brightness applied.
    pub fn iter_leds(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        let brightness = self.brightness as u16;
        (0..NUM_LEDS).map(move |i| {
            let col = i / ROWS;
            let pos = i % ROWS;
            let row = if col % 2 == 0 { pos } else { ROWS - 1 - pos };
            let [r, g, b] = self.pixels[row][col];
            [
                ((r as u16 * brightness) / 255) as u8,
                ((g as u16 * brightness) / 255) as u8,
                ((b as u16 * brightness) / 255) as u8,
            ]
        })
    }
}

impl OriginDimensions for MatrixFrame {
    fn size(&self) -> Size {
        Size::new(GRID_COLS as u32, GRID_ROWS as u32)
    }
}

impl DrawTarget for MatrixFrame {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..COLS as i32).contains(&point.x) && (0..ROWS as i32).contains(&point.y) {
                self.put(
                    point.x as u8,
                    point.y as u8,
                    [color.r(), color.g(), color.b()],
                );
            }
        }
        Ok(())
    }
}

impl MatrixDisplay for MatrixFrame {
    fn clear(&mut self) {
        self.pixels = [[[0; 3]; COLS]; ROWS];
    }

    fn set_pixel(&mut self, col: u8, row: u8, half: Half, color: Color) {
        if row >= HALF_ROWS {
            return;
        }
        let abs_row = match half {
            Half::Top => row,
            Half::Bottom => row + HALF_ROWS,
        };
        self.put(col, abs_row, color_rgb(color));
    }

    fn draw_row(&mut self, half: Half, text: &str, color: Color) {
        let y0 = match half {
            Half::Top => 0,
            Half::Bottom => HALF_ROWS as i32,
        };
        // Blank the half, then let the draw target clip the glyphs
        for row in y0..y0 + HALF_ROWS as i32 {
            for col in 0..COLS {
                self.pixels[row as usize][col] = [0; 3];
            }
        }

        let [r, g, b] = color_rgb(color);
        let style = MonoTextStyle::new(&FONT_4X6, Rgb888::new(r, g, b));
        // Infallible by construction
        let _ = Text::with_baseline(text, Point::new(0, y0 + 1), style, Baseline::Top).draw(self);
    }

    fn flush(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_pixel_maps_halves() {
        let mut frame = MatrixFrame::new();
        frame.set_pixel(3, 2, Half::Top, Color::Red);
        frame.set_pixel(3, 2, Half::Bottom, Color::Blue);
        assert_eq!(frame.pixel_rgb(3, 2), [255, 0, 0]);
        assert_eq!(frame.pixel_rgb(3, 2 + HALF_ROWS), [0, 0, 255]);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut frame = MatrixFrame::new();
        frame.set_pixel(GRID_COLS, 0, Half::Top, Color::Red);
        frame.set_pixel(0, HALF_ROWS, Half::Top, Color::Red);
        assert!(frame.iter_leds().all(|rgb| rgb == [0, 0, 0]));
    }

    #[test]
    fn test_serpentine_order() {
        // Column 0 runs top-down, column 1 bottom-up
        assert_eq!(led_index(0, 0), 0);
        assert_eq!(led_index(0, 15), 15);
        assert_eq!(led_index(1, 15), 16);
        assert_eq!(led_index(1, 0), 31);
        assert_eq!(led_index(2, 0), 32);
    }

    #[test]
    fn test_iter_leds_matches_index() {
        let mut frame = MatrixFrame::new();
        frame.set_pixel(1, 0, Half::Top, Color::Green);
        let leds: heapless::Vec<[u8; 3], NUM_LEDS> = frame.iter_leds().collect();
        assert_eq!(leds[led_index(1, 0)], [0, 255, 0]);
        assert_eq!(leds.iter().filter(|&&c| c != [0, 0, 0]).count(), 1);
    }

    #[test]
    fn test_draw_row_stays_in_half() {
        let mut frame = MatrixFrame::new();
        frame.draw_row(Half::Top, "8", Color::White);

        let top_lit = (0..HALF_ROWS)
            .flat_map(|row| (0..GRID_COLS).map(move |col| (col, row)))
            .filter(|&(col, row)| frame.pixel_rgb(col, row) != [0, 0, 0])
            .count();
        let bottom_lit = (HALF_ROWS..GRID_ROWS)
            .flat_map(|row| (0..GRID_COLS).map(move |col| (col, row)))
            .filter(|&(col, row)| frame.pixel_rgb(col, row) != [0, 0, 0])
            .count();
        assert!(top_lit > 0);
        assert_eq!(bottom_lit, 0);
    }

    #[test]
    fn test_draw_row_replaces_previous_text() {
        let mut frame = MatrixFrame::new();
        frame.draw_row(Half::Bottom, "88888888", Color::White);
        frame.draw_row(Half::Bottom, " ", Color::White);
        let lit = frame.iter_leds().filter(|&rgb| rgb != [0, 0, 0]).count();
        assert_eq!(lit, 0);
    }

    #[test]
    fn test_overlong_text_is_clipped() {
        let mut frame = MatrixFrame::new();
        // 12 chars at 4px each would be 48px wide; must not panic and must
        // not wrap into the other half
        frame.draw_row(Half::Top, "888888888888", Color::White);
        for row in HALF_ROWS..GRID_ROWS {
            for col in 0..GRID_COLS {
                assert_eq!(frame.pixel_rgb(col, row), [0, 0, 0]);
            }
        }
    }

    #[test]
    fn test_brightness_scales_output() {
        let mut frame = MatrixFrame::new();
        frame.set_pixel(0, 0, Half::Top, Color::White);
        frame.set_brightness(128);
        let first = frame.iter_leds().next().unwrap();
        assert_eq!(first, [128, 128, 128]);
        // Logical buffer unaffected
        assert_eq!(frame.pixel_rgb(0, 0), [255, 255, 255]);
    }
}
