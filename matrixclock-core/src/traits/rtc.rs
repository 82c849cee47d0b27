//! Real-time source trait

/// A full calendar timestamp. Commits go through [`TimeSource::set`] as one
/// atomic write; the core never read-modify-writes partial fields on the
/// hardware side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// Fallback value when the hardware clock is absent at boot.
    pub const fn boot_default() -> Self {
        Self {
            year: 2000,
            month: 1,
            day: 1,
            hour: 12,
            minute: 0,
            second: 0,
        }
    }
}

impl Default for DateTime {
    fn default() -> Self {
        Self::boot_default()
    }
}

/// Errors that can occur reading or writing the clock hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Bus transaction failed (chip absent or wedged).
    Bus,
    /// Register contents did not decode to a plausible timestamp.
    Invalid,
}

/// Trait for the battery-backed clock chip.
pub trait TimeSource {
    fn now(&mut self) -> Result<DateTime, RtcError>;

    /// Write a complete new timestamp in one transaction.
    fn set(&mut self, dt: &DateTime) -> Result<(), RtcError>;
}
