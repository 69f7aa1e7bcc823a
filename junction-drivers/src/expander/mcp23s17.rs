//! MCP23S17 SPI port expander
//!
//! Sixteen GPIOs in two 8-bit banks behind a 3-byte SPI frame:
//! - Opcode: `0x40 | (hw_address << 1)`, bit 0 set for reads
//! - Register address (IOCON.BANK = 0 layout)
//! - Data byte
//!
//! On the controller board bits 0 and 4 of each bank are active-low sensor
//! inputs with pull-ups and interrupt-on-change. The remaining bits drive
//! lamps. INTA and INTB are mirrored so a single line signals a change on
//! either bank.

use junction_hal::{OutputPin, SpiBus};

/// MCP23S17 register addresses (IOCON.BANK = 0)
pub mod reg {
    /// I/O direction, bank A (1 = input)
    pub const IODIRA: u8 = 0x00;
    /// I/O direction, bank B
    pub const IODIRB: u8 = 0x01;
    /// Interrupt-on-change enable, bank A
    pub const GPINTENA: u8 = 0x04;
    /// Interrupt-on-change enable, bank B
    pub const GPINTENB: u8 = 0x05;
    /// Device configuration
    pub const IOCON: u8 = 0x0A;
    /// Pull-up enable, bank A
    pub const GPPUA: u8 = 0x0C;
    /// Pull-up enable, bank B
    pub const GPPUB: u8 = 0x0D;
    /// Port value, bank A
    pub const GPIOA: u8 = 0x12;
    /// Port value, bank B
    pub const GPIOB: u8 = 0x13;
    /// Output latch, bank A
    pub const OLATA: u8 = 0x14;
    /// Output latch, bank B
    pub const OLATB: u8 = 0x15;
}

/// IOCON: mirror INTA/INTB
pub const IOCON_MIRROR: u8 = 0x40;

/// Bits of each bank wired to sensor inputs
pub const SENSOR_MASK: u8 = 0x11;

const OPCODE_WRITE: u8 = 0x40;
const OPCODE_READ: u8 = 0x41;

/// Port expander errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpanderError {
    /// SPI transfer failed
    Bus,
}

/// MCP23S17 driver
pub struct Mcp23s17<SPI, CS> {
    spi: SPI,
    cs: CS,
    /// Hardware address (A2..A0 pins)
    hw_address: u8,
}

impl<SPI: SpiBus, CS: OutputPin> Mcp23s17<SPI, CS> {
    /// Create a driver for the expander at hardware address 0
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self::with_address(spi, cs, 0)
    }

    pub fn with_address(spi: SPI, mut cs: CS, hw_address: u8) -> Self {
        cs.set_high();
        Self {
            spi,
            cs,
            hw_address: hw_address & 0x07,
        }
    }

    fn opcode(&self, base: u8) -> u8 {
        base | (self.hw_address << 1)
    }

    /// Configure sensor inputs, pull-ups, change interrupts and clear lamps
    pub fn init(&mut self) -> Result<(), ExpanderError> {
        self.write_register(reg::IOCON, IOCON_MIRROR)?;
        self.write_register(reg::IODIRA, SENSOR_MASK)?;
        self.write_register(reg::IODIRB, SENSOR_MASK)?;
        self.write_register(reg::GPPUA, SENSOR_MASK)?;
        self.write_register(reg::GPPUB, SENSOR_MASK)?;
        self.write_register(reg::GPINTENA, SENSOR_MASK)?;
        self.write_register(reg::GPINTENB, SENSOR_MASK)?;
        self.write_latches(0, 0)
    }

    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), ExpanderError> {
        let frame = [self.opcode(OPCODE_WRITE), register, value];
        self.cs.set_low();
        let result = self.spi.write(&frame);
        self.cs.set_high();
        result.map_err(|_| ExpanderError::Bus)
    }

    pub fn read_register(&mut self, register: u8) -> Result<u8, ExpanderError> {
        let mut frame = [self.opcode(OPCODE_READ), register, 0];
        self.cs.set_low();
        let result = self.spi.transfer_in_place(&mut frame);
        self.cs.set_high();
        result.map_err(|_| ExpanderError::Bus)?;
        Ok(frame[2])
    }

    /// Read both port registers as (bank A, bank B)
    ///
    /// Reading the ports also clears a pending change interrupt.
    pub fn read_ports(&mut self) -> Result<(u8, u8), ExpanderError> {
        let a = self.read_register(reg::GPIOA)?;
        let b = self.read_register(reg::GPIOB)?;
        Ok((a, b))
    }

    /// Write both output latches; sensor bits are masked off
    pub fn write_latches(&mut self, bank_a: u8, bank_b: u8) -> Result<(), ExpanderError> {
        self.write_register(reg::OLATA, bank_a & !SENSOR_MASK)?;
        self.write_register(reg::OLATB, bank_b & !SENSOR_MASK)
    }

    /// Release the bus and chip-select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{MockCs, MockExpanderSpi};
    use super::*;

    #[test]
    fn test_init_register_traffic() {
        let mut expander = Mcp23s17::new(MockExpanderSpi::new(), MockCs::new());
        expander.init().unwrap();

        let (spi, cs) = expander.release();
        assert_eq!(
            spi.writes.as_slice(),
            &[
                (0x40, reg::IOCON, 0x40),
                (0x40, reg::IODIRA, 0x11),
                (0x40, reg::IODIRB, 0x11),
                (0x40, reg::GPPUA, 0x11),
                (0x40, reg::GPPUB, 0x11),
                (0x40, reg::GPINTENA, 0x11),
                (0x40, reg::GPINTENB, 0x11),
                (0x40, reg::OLATA, 0x00),
                (0x40, reg::OLATB, 0x00),
            ]
        );
        assert!(cs.high);
        assert_eq!(cs.selects, 9);
    }

    #[test]
    fn test_hardware_address_in_opcode() {
        let mut expander = Mcp23s17::with_address(MockExpanderSpi::new(), MockCs::new(), 3);
        expander.write_register(reg::OLATA, 0x20).unwrap();
        let (spi, _) = expander.release();
        assert_eq!(spi.writes[0], (0x46, reg::OLATA, 0x20));
    }

    #[test]
    fn test_read_ports() {
        let mut spi = MockExpanderSpi::new();
        spi.registers[reg::GPIOA as usize] = 0xEE;
        spi.registers[reg::GPIOB as usize] = 0x11;
        let mut expander = Mcp23s17::new(spi, MockCs::new());

        assert_eq!(expander.read_ports(), Ok((0xEE, 0x11)));
    }

    #[test]
    fn test_latches_never_drive_sensor_bits() {
        let mut expander = Mcp23s17::new(MockExpanderSpi::new(), MockCs::new());
        expander.write_latches(0xFF, 0xFF).unwrap();
        let (spi, _) = expander.release();
        assert_eq!(spi.registers[reg::OLATA as usize], 0xEE);
        assert_eq!(spi.registers[reg::OLATB as usize], 0xEE);
    }

    #[test]
    fn test_bus_error_releases_cs() {
        let mut spi = MockExpanderSpi::new();
        spi.fail = true;
        let mut expander = Mcp23s17::new(spi, MockCs::new());

        assert_eq!(expander.read_register(reg::GPIOA), Err(ExpanderError::Bus));
        let (_, cs) = expander.release();
        assert!(cs.high);
    }
}
