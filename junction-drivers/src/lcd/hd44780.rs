//! HD44780 character LCD over a PCF8574 I2C backpack
//!
//! The backpack maps its eight port bits onto the LCD bus:
//!
//! | Bit | Signal    |
//! |-----|-----------|
//! | 0   | RS        |
//! | 1   | RW        |
//! | 2   | EN        |
//! | 3   | Backlight |
//! | 4-7 | D4-D7     |
//!
//! The LCD runs in 4-bit mode; every byte is sent as two EN-strobed
//! nibbles. Backpacks ship with different address straps, so the driver
//! probes a list of candidate addresses and keeps the first that answers.

use junction_display::{DisplayBackend, DisplayError};
use junction_hal::{DelayUs, I2cBus};

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

/// LCD commands
pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 4-bit bus, two lines, 5x8 font
    pub const FUNCTION_SET: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

const COLS: u8 = 16;
const ROWS: u8 = 2;

/// LCD errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// No backpack answered at any candidate address
    NotFound,
    /// I2C transfer failed after initialisation
    Bus,
}

/// HD44780 driver
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    ready: bool,
}

impl<I2C: I2cBus, D: DelayUs> Hd44780<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: 0,
            ready: false,
        }
    }

    /// Initialise the first backpack that responds
    ///
    /// Returns the address in use.
    pub fn probe(&mut self, addresses: &[u8]) -> Result<u8, LcdError> {
        for &address in addresses {
            self.address = address;
            if self.init().is_ok() {
                self.ready = true;
                return Ok(address);
            }
        }
        self.ready = false;
        Err(LcdError::NotFound)
    }

    pub fn address(&self) -> Option<u8> {
        self.ready.then_some(self.address)
    }

    /// Power-on reset into 4-bit mode
    fn init(&mut self) -> Result<(), LcdError> {
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1);

        // Three 8-bit function sets, then switch to 4-bit
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20, 0)?;

        self.command(cmd::FUNCTION_SET)?;
        self.command(cmd::DISPLAY_ON)?;
        self.command(cmd::CLEAR)?;
        self.delay.delay_ms(2);
        self.command(cmd::ENTRY_MODE_INCREMENT)
    }

    fn expander_write(&mut self, bits: u8) -> Result<(), LcdError> {
        self.i2c
            .write(self.address, &[bits | BACKLIGHT])
            .map_err(|_| LcdError::Bus)
    }

    /// Latch the upper nibble of `nibble` with the given control bits
    fn write_nibble(&mut self, nibble: u8, control: u8) -> Result<(), LcdError> {
        let bits = (nibble & 0xF0) | control;
        self.expander_write(bits | EN)?;
        self.delay.delay_us(1);
        self.expander_write(bits)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn send(&mut self, value: u8, control: u8) -> Result<(), LcdError> {
        self.write_nibble(value & 0xF0, control)?;
        self.write_nibble(value << 4, control)
    }

    fn command(&mut self, command: u8) -> Result<(), LcdError> {
        self.send(command, 0)
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), LcdError> {
        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn ensure_ready(&self) -> Result<(), DisplayError> {
        if self.ready {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }
}

impl<I2C: I2cBus, D: DelayUs> DisplayBackend for Hd44780<I2C, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        self.command(cmd::CLEAR)
            .map_err(|_| DisplayError::Communication)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        if row >= ROWS || col >= COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.set_cursor(row, col)
            .map_err(|_| DisplayError::Communication)?;
        let room = usize::from(COLS - col);
        for byte in text.bytes().take(room) {
            self.send(byte, RS)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLS, ROWS)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
