//! SPI bus abstractions
//!
//! Used for the port expander that carries four sensors and two lamp banks.
//! Chip select is handled by the driver, not the bus.

/// SPI bus master
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Transfer data in place
    ///
    /// Writes data from buffer while reading into the same buffer.
    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error>;
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 1_000_000, // 1 MHz
            mode: Mode::Mode0,
        }
    }
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Clock idles high (CPOL=1)
    pub fn idle_high(self) -> bool {
        matches!(self, Mode::Mode2 | Mode::Mode3)
    }

    /// Data captured on the second clock transition (CPHA=1)
    pub fn capture_on_second(self) -> bool {
        matches!(self, Mode::Mode1 | Mode::Mode3)
    }
}
