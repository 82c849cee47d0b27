//! AT24C32 EEPROM driver
//!
//! The 4KB EEPROM that ships on DS3231 breakout boards. Addressing is two
//! bytes, pages are 32 bytes, and a write needs up to 5 ms to settle
//! before the device ACKs again.
//!
//! EEPROM has a limited number of write cycles in its life; the score and
//! settings code above this driver only writes values that changed.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use matrixclock_core::traits::{NvStore, StoreError};

/// Bus address with A0-A2 strapped high (common on DS3231 modules).
const EEPROM_ADDRESS: u8 = 0x57;

/// Worst-case write cycle time.
const WRITE_CYCLE_MS: u32 = 5;

/// Largest chunk written in one transaction; stays well inside a page for
/// the small aligned records this firmware keeps.
const MAX_CHUNK: usize = 8;

pub struct At24c32<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C: I2c, D: DelayNs> At24c32<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }
}

impl<I2C: I2c, D: DelayNs> NvStore for At24c32<I2C, D> {
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), StoreError> {
        let addr = offset.to_be_bytes();
        self.i2c
            .write_read(EEPROM_ADDRESS, &addr, buf)
            .map_err(|_| StoreError::Bus)
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StoreError> {
        let mut offset = offset;
        for chunk in data.chunks(MAX_CHUNK) {
            let mut buf = [0u8; 2 + MAX_CHUNK];
            buf[..2].copy_from_slice(&offset.to_be_bytes());
            buf[2..2 + chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(EEPROM_ADDRESS, &buf[..2 + chunk.len()])
                .map_err(|_| StoreError::Bus)?;
            self.delay.delay_ms(WRITE_CYCLE_MS);
            offset += chunk.len() as u16;
        }
        Ok(())
    }
}
