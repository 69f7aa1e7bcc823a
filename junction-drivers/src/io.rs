//! Controller board IO
//!
//! Four demand sensors and two lamp heads live on the port expander. The
//! remaining two sensors, the hazard input and the third-bank lamp head
//! are on MCU GPIO. All inputs are active-low with pull-ups.

use junction_core::sensor::{SensorLevels, SENSOR_COUNT};
use junction_core::signal::LampState;
use junction_core::traits::{LampOutput, SensorBus};
use junction_hal::{ActiveLevel, InputPin, OutputPin, SpiBus};

use crate::expander::{ExpanderError, Mcp23s17};

const BIT0: u8 = 0x01;
const BIT4: u8 = 0x10;

/// Aux lamp bits in (green, yellow, red) order
const AUX_LAMPS: [u8; 3] = [0x02, 0x04, 0x08];

/// Sensor bus and lamp output over the expander plus direct GPIO
pub struct ExpanderIo<SPI, CS, IN, OUT> {
    expander: Mcp23s17<SPI, CS>,
    /// Sensors 4 and 5
    direct_sensors: [IN; 2],
    hazard: IN,
    /// Green, yellow, red of the aux lamp head
    aux_lamps: [OUT; 3],
}

impl<SPI, CS, IN, OUT> ExpanderIo<SPI, CS, IN, OUT>
where
    SPI: SpiBus,
    CS: OutputPin,
    IN: InputPin,
    OUT: OutputPin,
{
    pub fn new(
        expander: Mcp23s17<SPI, CS>,
        direct_sensors: [IN; 2],
        hazard: IN,
        aux_lamps: [OUT; 3],
    ) -> Self {
        Self {
            expander,
            direct_sensors,
            hazard,
            aux_lamps,
        }
    }

    /// Configure the expander and drive every lamp dark
    pub fn init(&mut self) -> Result<(), ExpanderError> {
        self.expander.init()?;
        for lamp in self.aux_lamps.iter_mut() {
            lamp.set_low();
        }
        Ok(())
    }
}

impl<SPI, CS, IN, OUT> SensorBus for ExpanderIo<SPI, CS, IN, OUT>
where
    SPI: SpiBus,
    CS: OutputPin,
    IN: InputPin,
    OUT: OutputPin,
{
    type Error = ExpanderError;

    fn read_levels(&mut self) -> Result<SensorLevels, ExpanderError> {
        let (a, b) = self.expander.read_ports()?;
        let low = |port: u8, bit: u8| port & bit == 0;

        let mut sensors = [false; SENSOR_COUNT];
        sensors[0] = low(a, BIT0);
        sensors[1] = low(a, BIT4);
        sensors[2] = low(b, BIT0);
        sensors[3] = low(b, BIT4);
        sensors[4] = self.direct_sensors[0].is_active(ActiveLevel::Low);
        sensors[5] = self.direct_sensors[1].is_active(ActiveLevel::Low);

        Ok(SensorLevels {
            sensors,
            hazard: self.hazard.is_active(ActiveLevel::Low),
        })
    }
}

impl<SPI, CS, IN, OUT> LampOutput for ExpanderIo<SPI, CS, IN, OUT>
where
    SPI: SpiBus,
    CS: OutputPin,
    IN: InputPin,
    OUT: OutputPin,
{
    type Error = ExpanderError;

    fn write_lamps(&mut self, lamps: LampState) -> Result<(), ExpanderError> {
        self.expander.write_latches(lamps.bank_a(), lamps.bank_b())?;
        let aux = lamps.aux();
        for (pin, bit) in self.aux_lamps.iter_mut().zip(AUX_LAMPS) {
            pin.set_state(aux & bit != 0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::mcp23s17::mock::{MockCs, MockExpanderSpi};
    use crate::expander::mcp23s17::reg;
    use junction_core::signal::{Colour, GROUP_COUNT};

    struct MockInput {
        high: bool,
    }

    impl InputPin for MockInput {
        fn is_high(&self) -> bool {
            self.high
        }
    }

    struct MockOutput {
        high: bool,
    }

    impl OutputPin for MockOutput {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    type TestIo = ExpanderIo<MockExpanderSpi, MockCs, MockInput, MockOutput>;

    fn make_io(spi: MockExpanderSpi, s4_high: bool, hazard_high: bool) -> TestIo {
        ExpanderIo::new(
            Mcp23s17::new(spi, MockCs::new()),
            [MockInput { high: s4_high }, MockInput { high: true }],
            MockInput { high: hazard_high },
            [
                MockOutput { high: true },
                MockOutput { high: true },
                MockOutput { high: true },
            ],
        )
    }

    #[test]
    fn test_idle_inputs_read_inactive() {
        let mut spi = MockExpanderSpi::new();
        spi.registers[reg::GPIOA as usize] = 0xFF;
        spi.registers[reg::GPIOB as usize] = 0xFF;
        let mut io = make_io(spi, true, true);

        assert_eq!(io.read_levels(), Ok(SensorLevels::IDLE));
    }

    #[test]
    fn test_active_low_mapping() {
        let mut spi = MockExpanderSpi::new();
        // Bank A bit 4 and bank B bit 0 pulled low
        spi.registers[reg::GPIOA as usize] = 0xEF;
        spi.registers[reg::GPIOB as usize] = 0xFE;
        let mut io = make_io(spi, false, false);

        let levels = io.read_levels().unwrap();
        assert_eq!(levels.sensors, [false, true, true, false, true, false]);
        assert!(levels.hazard);
    }

    #[test]
    fn test_init_darkens_aux() {
        let mut io = make_io(MockExpanderSpi::new(), true, true);
        io.init().unwrap();
        assert!(io.aux_lamps.iter().all(|p| !p.is_set_high()));
    }

    #[test]
    fn test_lamp_write() {
        let mut io = make_io(MockExpanderSpi::new(), true, true);
        // West and East green; turn, side A and side B red
        let lamps = LampState::from_colours(&[
            Colour::Green,
            Colour::Green,
            Colour::Red,
            Colour::Red,
            Colour::Red,
        ]);
        io.write_lamps(lamps).unwrap();

        let (spi, _) = io.expander.release();
        assert_eq!(spi.registers[reg::OLATA as usize], 0x28);
        assert_eq!(spi.registers[reg::OLATB as usize], 0x28);
        let aux: [bool; 3] = core::array::from_fn(|i| io.aux_lamps[i].is_set_high());
        assert_eq!(aux, [false, false, true]);
    }

    #[test]
    fn test_hazard_dark_phase() {
        let mut io = make_io(MockExpanderSpi::new(), true, true);
        io.write_lamps(LampState::from_colours(&[Colour::Off; GROUP_COUNT]))
            .unwrap();
        assert!(io.aux_lamps.iter().all(|p| !p.is_set_high()));
    }
}
