//! Blocking I2C master

use embassy_rp::i2c::{Blocking, Error, I2c, Instance};
use junction_hal::I2cBus;

/// I2C bus in blocking mode
pub struct RpI2c<'d, T: Instance> {
    i2c: I2c<'d, T, Blocking>,
}

impl<'d, T: Instance> RpI2c<'d, T> {
    pub fn new(i2c: I2c<'d, T, Blocking>) -> Self {
        Self { i2c }
    }
}

impl<T: Instance> I2cBus for RpI2c<'_, T> {
    type Error = Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Error> {
        self.i2c.blocking_write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Error> {
        self.i2c.blocking_read(address, buf)
    }
}
