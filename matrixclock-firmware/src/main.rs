//! Matrixclock - LED matrix wall clock with built-in mini-games
//!
//! Main firmware binary for RP2040 boards driving a 32x16 WS2812 matrix.
//! The whole application is one synchronous tick loop in matrixclock-core;
//! this binary only wires peripherals and feeds it samples.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_time::{Delay, Duration, Instant, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use matrixclock_core::config::TICK_MS;
use matrixclock_core::controller::Controller;
use matrixclock_drivers::{At24c32, Ds3231, Equations};

use crate::board::{ClockBoard, InputPins, PanelDisplay};

mod board;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

// The I2C bus outlives main so both bus devices can borrow it
static I2C_BUS: StaticCell<core::cell::RefCell<I2c<'static, I2C0, i2c::Blocking>>> =
    StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("matrixclock firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // DS3231 + AT24C32 share one bus on the common breakout module
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let i2c_bus = I2C_BUS.init(core::cell::RefCell::new(i2c));
    let rtc = Ds3231::new(embedded_hal_bus::i2c::RefCellDevice::new(i2c_bus));
    let store = At24c32::new(embedded_hal_bus::i2c::RefCellDevice::new(i2c_bus), Delay);
    info!("I2C peripherals initialized");

    // WS2812 chain on PIO0, data pin GPIO16
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_16, &program);
    let display = PanelDisplay::new(ws);
    info!("LED matrix initialized");

    // Decoder lines are pushed high by the second MCU for >=50 ms per
    // press; the button shorts to ground.
    let pins = InputPins {
        key_return: Input::new(p.PIN_6, Pull::Down),
        up: Input::new(p.PIN_7, Pull::Down),
        down: Input::new(p.PIN_8, Pull::Down),
        left: Input::new(p.PIN_9, Pull::Down),
        right: Input::new(p.PIN_10, Pull::Down),
        ok: Input::new(p.PIN_11, Pull::Down),
        game1: Input::new(p.PIN_12, Pull::Down),
        game2: Input::new(p.PIN_13, Pull::Down),
        game3: Input::new(p.PIN_14, Pull::Down),
        options: Input::new(p.PIN_15, Pull::Down),
        button: Input::new(p.PIN_2, Pull::Up),
    };
    info!("Input pins initialized");

    let seed = Instant::now().as_ticks() as u32 | 1;
    let mut board = ClockBoard {
        display,
        rtc,
        store,
        equations: Equations::new(seed),
    };

    let mut controller = Controller::boot(&mut board, Instant::now().as_millis(), seed);
    info!("Controller booted, entering tick loop");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    loop {
        let sample = pins.sample();
        controller.tick(&mut board, &sample, Instant::now().as_millis());
        ticker.next().await;
    }
}
