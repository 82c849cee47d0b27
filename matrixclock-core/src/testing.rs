//! Shared test doubles
//!
//! Every controller-level test needs a board; these fakes record enough to
//! assert on without touching hardware.

use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::config::{EQUATION_LEN, GRID_COLS, GRID_ROWS, HALF_ROWS};
use crate::input::{ActivityClock, Edges, InputSample, Key, LineDispatcher, LineLevels};
use crate::traits::{
    Board, Color, DateTime, EquationSource, Half, MatrixDisplay, NvStore, RtcError, StoreError,
    TimeSource,
};

/// Build an [`InputSample`] with the given keys asserted.
pub fn sample(keys: &[Key]) -> InputSample {
    let mut lines = LineLevels::empty();
    for &k in keys {
        lines.set(k, true);
    }
    InputSample {
        lines,
        button_pressed: false,
    }
}

/// Single-tick edges for the given keys, for driving engines directly.
pub fn edges(keys: &[Key]) -> Edges {
    let mut disp = LineDispatcher::new();
    let mut activity = ActivityClock::new(0);
    disp.poll(&sample(keys), 0, &mut activity)
}

/// Pixel-recording display.
pub struct FakeDisplay {
    pixels: [[Color; GRID_COLS as usize]; GRID_ROWS as usize],
    /// Log of `draw_row` calls since the last clear.
    pub rows: Vec<(Half, String<16>, Color), 32>,
    pub clears: u32,
    pub flushes: u32,
}

impl Default for FakeDisplay {
    fn default() -> Self {
        Self {
            pixels: [[Color::Off; GRID_COLS as usize]; GRID_ROWS as usize],
            rows: Vec::new(),
            clears: 0,
            flushes: 0,
        }
    }
}

impl FakeDisplay {
    /// Full-grid pixel readback.
    pub fn pixel_at(&self, col: u8, row: u8) -> Color {
        self.pixels[row as usize][col as usize]
    }
}

impl MatrixDisplay for FakeDisplay {
    fn clear(&mut self) {
        self.pixels = [[Color::Off; GRID_COLS as usize]; GRID_ROWS as usize];
        self.rows.clear();
        self.clears += 1;
    }

    fn set_pixel(&mut self, col: u8, row: u8, half: Half, color: Color) {
        if col >= GRID_COLS || row >= HALF_ROWS {
            return;
        }
        let abs_row = match half {
            Half::Top => row,
            Half::Bottom => row + HALF_ROWS,
        };
        self.pixels[abs_row as usize][col as usize] = color;
    }

    fn draw_row(&mut self, half: Half, text: &str, color: Color) {
        let mut copy: String<16> = String::new();
        let _ = copy.push_str(text);
        let _ = self.rows.push((half, copy, color));
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

/// In-memory byte store counting writes.
pub struct FakeStore {
    pub mem: [u8; 16],
    pub writes: u32,
    pub fail: bool,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            mem: [0; 16],
            writes: 0,
            fail: false,
        }
    }
}

impl FakeStore {
    /// A store whose every cell reads as `fill` (e.g. a blank EEPROM).
    pub fn filled(fill: u8) -> Self {
        Self {
            mem: [fill; 16],
            ..Self::default()
        }
    }

    pub fn put_u8(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }

    pub fn get_u8(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    pub fn put_u16(&mut self, addr: u16, value: u16) {
        self.mem[addr as usize..addr as usize + 2].copy_from_slice(&value.to_le_bytes());
    }

    pub fn get_u16(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.mem[addr as usize], self.mem[addr as usize + 1]])
    }
}

impl NvStore for FakeStore {
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Bus);
        }
        let start = offset as usize;
        buf.copy_from_slice(&self.mem[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Bus);
        }
        let start = offset as usize;
        self.mem[start..start + data.len()].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}

/// Scripted clock chip.
pub struct FakeRtc {
    pub now: DateTime,
    pub fail_reads: bool,
    pub last_set: Option<DateTime>,
}

impl Default for FakeRtc {
    fn default() -> Self {
        Self {
            now: DateTime {
                year: 2026,
                month: 8,
                day: 6,
                hour: 10,
                minute: 20,
                second: 30,
            },
            fail_reads: false,
            last_set: None,
        }
    }
}

impl TimeSource for FakeRtc {
    fn now(&mut self) -> Result<DateTime, RtcError> {
        if self.fail_reads {
            Err(RtcError::Bus)
        } else {
            Ok(self.now)
        }
    }

    fn set(&mut self, dt: &DateTime) -> Result<(), RtcError> {
        self.last_set = Some(*dt);
        self.now = *dt;
        Ok(())
    }
}

/// Deterministic equation stand-in: "=value".
#[derive(Default)]
pub struct FakeEquations {
    pub calls: u32,
}

impl EquationSource for FakeEquations {
    fn equation(&mut self, value: u8, _difficulty: u8, out: &mut String<EQUATION_LEN>) {
        self.calls += 1;
        out.clear();
        let _ = write!(out, "={}", value);
    }
}

/// The full board bundle.
#[derive(Default)]
pub struct FakeBoard {
    pub display: FakeDisplay,
    pub store: FakeStore,
    pub rtc: FakeRtc,
    pub eq: FakeEquations,
    /// Total blocking delay requested, in ms.
    pub delayed_ms: u32,
}

impl Board for FakeBoard {
    type Display = FakeDisplay;
    type Store = FakeStore;
    type Rtc = FakeRtc;
    type Equations = FakeEquations;

    fn display(&mut self) -> &mut FakeDisplay {
        &mut self.display
    }

    fn store(&mut self) -> &mut FakeStore {
        &mut self.store
    }

    fn rtc(&mut self) -> &mut FakeRtc {
        &mut self.rtc
    }

    fn equations(&mut self) -> &mut FakeEquations {
        &mut self.eq
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delayed_ms += ms;
    }
}
