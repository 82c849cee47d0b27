//! Tunable constants
//!
//! Every timing window, threshold and geometry value lives here so the
//! behavior of the whole device can be read in one place.

/// Panel width in pixels.
pub const GRID_COLS: u8 = 32;
/// Panel height in pixels (two stacked halves of [`HALF_ROWS`]).
pub const GRID_ROWS: u8 = 16;
/// Rows per addressable half.
pub const HALF_ROWS: u8 = 8;
/// Characters per text row (4x6 font across 32 columns).
pub const TEXT_COLS: usize = 8;

/// Scheduler tick period. The remote decoder holds each pulse line
/// asserted for at least 50 ms, so a 10 ms tick cannot miss an edge.
pub const TICK_MS: u64 = 10;

// Button gesture thresholds (see input::button)
pub const SHORT_PRESS_MAX_MS: u64 = 400;
pub const MEDIUM_HOLD_MS: u64 = 1_500;
pub const LONG_HOLD_MS: u64 = 3_000;

// Idle timeouts per mode. Clock has none.
pub const SELECT_TIMEOUT_MS: u64 = 10_000;
pub const SETTINGS_TIMEOUT_MS: u64 = 30_000;
pub const EDIT_TIMEOUT_MS: u64 = 30_000;
/// Games time out against the game activity timestamp, not the general one.
pub const GAME_TIMEOUT_MS: u64 = 120_000;

// Runner engine
pub const RUNNER_START_INTERVAL_MS: u64 = 400;
pub const RUNNER_INTERVAL_STEP_MS: u64 = 20;
pub const RUNNER_MIN_INTERVAL_MS: u64 = 150;
pub const RUNNER_JUMP_MS: u64 = 700;
pub const RUNNER_PLAYER_COL: u8 = 4;
pub const RUNNER_GROUND_ROW: u8 = 14;
pub const RUNNER_AIR_ROW: u8 = 11;

// Dodge engine
pub const DODGE_START_INTERVAL_MS: u64 = 300;
pub const DODGE_INTERVAL_STEP_MS: u64 = 10;
pub const DODGE_MIN_INTERVAL_MS: u64 = 100;
pub const DODGE_PLAYER_ROW: u8 = 15;
pub const DODGE_MAX_BLOCK_WIDTH: u8 = 3;

// Snake engine
pub const SNAKE_START_INTERVAL_MS: u64 = 350;
pub const SNAKE_INTERVAL_STEP_MS: u64 = 25;
pub const SNAKE_MIN_INTERVAL_MS: u64 = 120;
pub const SNAKE_MAX_LEN: usize = 64;
pub const SNAKE_SPEEDUP_EVERY: u16 = 5;
/// Food placement gives up after this many random probes and retries on
/// the next movement tick instead.
pub const FOOD_PLACE_RETRIES: u8 = 32;

/// Highest score accepted from storage; anything above is treated as a
/// corrupt cell and reset to 0.
pub const SCORE_MAX_PLAUSIBLE: u16 = 9_999;

// Difficulty (consumed by the equation generator only)
pub const DIFFICULTY_MIN: u8 = 1;
pub const DIFFICULTY_MAX: u8 = 5;
pub const DIFFICULTY_DEFAULT: u8 = 3;

// Non-volatile store layout (byte offsets)
pub const ADDR_DIFFICULTY: u16 = 0;
pub const ADDR_SCORE_RUNNER: u16 = 2;
pub const ADDR_SCORE_DODGE: u16 = 4;
pub const ADDR_SCORE_SNAKE: u16 = 6;

// Blocking feedback sequences
pub const FLASH_COUNT: u8 = 3;
pub const FLASH_ON_MS: u32 = 120;
pub const FLASH_OFF_MS: u32 = 120;
pub const SNAKE_DEAD_SHOW_MS: u32 = 600;
pub const SCORE_SHOW_MS: u32 = 1_200;
pub const RTC_FAULT_SHOW_MS: u32 = 2_000;

/// Capacity of an equation string ("59-20", "7*8+3", ...).
pub const EQUATION_LEN: usize = 8;

/// Speed ramp shared by all engines: shrink `interval` by `step`, never
/// below `floor`.
pub const fn ramp_interval(interval: u64, step: u64, floor: u64) -> u64 {
    let next = interval.saturating_sub(step);
    if next < floor {
        floor
    } else {
        next
    }
}
