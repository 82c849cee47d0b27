//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in matrixclock-core:
//!
//! - DS3231 battery-backed clock (`TimeSource`)
//! - AT24C32 EEPROM, as found on DS3231 breakout boards (`NvStore`)
//! - `MatrixFrame`, a framebuffer `MatrixDisplay` with WS2812 chain
//!   ordering and 4x6 text rendering
//! - The equation generator consumed by the clock face
//!
//! All drivers are generic over `embedded-hal` 1.0 bus traits and build
//! on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod at24c32;
pub mod ds3231;
pub mod equations;
pub mod matrix;

pub use at24c32::At24c32;
pub use ds3231::Ds3231;
pub use equations::Equations;
pub use matrix::MatrixFrame;
