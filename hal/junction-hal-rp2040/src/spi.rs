//! Blocking SPI master

use embassy_rp::spi::{Blocking, Error, Instance, Spi};
use junction_hal::SpiBus;

/// SPI bus in blocking mode
///
/// Chip select is driven separately by the device driver.
pub struct RpSpi<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
}

impl<'d, T: Instance> RpSpi<'d, T> {
    pub fn new(spi: Spi<'d, T, Blocking>) -> Self {
        Self { spi }
    }
}

impl<T: Instance> SpiBus for RpSpi<'_, T> {
    type Error = Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        self.spi.blocking_write(data)
    }

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Error> {
        self.spi.blocking_transfer_in_place(data)
    }
}
