//! RP2040 HAL for the junction controller firmware
//!
//! Thin newtypes that put embassy-rp peripherals behind the shared
//! `junction-hal` traits:
//!
//! - GPIO outputs and inputs
//! - Blocking SPI (port expander)
//! - Blocking I2C (LCD backpack)
//! - Busy-wait delays on the embassy time driver

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod i2c;
pub mod spi;

pub use delay::EmbassyDelay;
pub use gpio::{RpInput, RpOutput};
pub use i2c::RpI2c;
pub use spi::RpSpi;
