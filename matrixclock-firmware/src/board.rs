//! Board wiring
//!
//! Bundles the panel, clock chip, EEPROM and equation generator into the
//! `Board` the core controller drives, and groups the eleven input GPIOs
//! for per-tick sampling.

use core::cell::RefCell;

use embassy_rp::gpio::Input;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::{I2C0, PIO0};
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_time::{block_for, Delay, Duration};
use embedded_hal_bus::i2c::RefCellDevice;
use smart_leds::RGB8;

use matrixclock_core::input::{InputSample, Key, LineLevels};
use matrixclock_core::traits::{Board, Color, Half, MatrixDisplay};
use matrixclock_drivers::matrix::NUM_LEDS;
use matrixclock_drivers::{At24c32, Ds3231, Equations, MatrixFrame};

pub type SharedI2c = RefCellDevice<'static, I2c<'static, I2C0, Blocking>>;

/// Framebuffer plus the PIO state machine that owns the LED chain.
pub struct PanelDisplay {
    frame: MatrixFrame,
    ws: PioWs2812<'static, PIO0, 0, NUM_LEDS>,
}

impl PanelDisplay {
    pub fn new(ws: PioWs2812<'static, PIO0, 0, NUM_LEDS>) -> Self {
        Self {
            frame: MatrixFrame::new(),
            ws,
        }
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.frame.set_brightness(brightness);
    }
}

impl MatrixDisplay for PanelDisplay {
    fn clear(&mut self) {
        self.frame.clear();
    }

    fn set_pixel(&mut self, col: u8, row: u8, half: Half, color: Color) {
        self.frame.set_pixel(col, row, half, color);
    }

    fn draw_row(&mut self, half: Half, text: &str, color: Color) {
        self.frame.draw_row(half, text, color);
    }

    fn flush(&mut self) {
        let mut colors = [RGB8::default(); NUM_LEDS];
        for (slot, [r, g, b]) in colors.iter_mut().zip(self.frame.iter_leds()) {
            *slot = RGB8::new(r, g, b);
        }
        // The DMA push is the only await point in the loop; blocking on it
        // keeps the controller's synchronous contract.
        embassy_futures::block_on(self.ws.write(&colors));
    }
}

/// The Board bundle handed to the controller.
pub struct ClockBoard {
    pub display: PanelDisplay,
    pub rtc: Ds3231<SharedI2c>,
    pub store: At24c32<SharedI2c, Delay>,
    pub equations: Equations,
}

impl Board for ClockBoard {
    type Display = PanelDisplay;
    type Store = At24c32<SharedI2c, Delay>;
    type Rtc = Ds3231<SharedI2c>;
    type Equations = Equations;

    fn display(&mut self) -> &mut PanelDisplay {
        &mut self.display
    }

    fn store(&mut self) -> &mut Self::Store {
        &mut self.store
    }

    fn rtc(&mut self) -> &mut Self::Rtc {
        &mut self.rtc
    }

    fn equations(&mut self) -> &mut Equations {
        &mut self.equations
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}

/// The ten decoder lines (asserted high) and the button (asserted low).
pub struct InputPins {
    pub key_return: Input<'static>,
    pub up: Input<'static>,
    pub down: Input<'static>,
    pub left: Input<'static>,
    pub right: Input<'static>,
    pub ok: Input<'static>,
    pub game1: Input<'static>,
    pub game2: Input<'static>,
    pub game3: Input<'static>,
    pub options: Input<'static>,
    pub button: Input<'static>,
}

impl InputPins {
    pub fn sample(&self) -> InputSample {
        let mut lines = LineLevels::empty();
        lines.set(Key::Return, self.key_return.is_high());
        lines.set(Key::Up, self.up.is_high());
        lines.set(Key::Down, self.down.is_high());
        lines.set(Key::Left, self.left.is_high());
        lines.set(Key::Right, self.right.is_high());
        lines.set(Key::Ok, self.ok.is_high());
        lines.set(Key::Game1, self.game1.is_high());
        lines.set(Key::Game2, self.game2.is_high());
        lines.set(Key::Game3, self.game3.is_high());
        lines.set(Key::Options, self.options.is_high());
        InputSample {
            lines,
            button_pressed: self.button.is_low(),
        }
    }
}
