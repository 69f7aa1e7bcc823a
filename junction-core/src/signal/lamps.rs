//! Lamp output projection
//!
//! Maps group colours onto the packed lamp word driven by the output
//! stage. Bits 0-7 go to expander bank A, bits 8-15 to bank B and bits
//! 16-23 to the auxiliary GPIO lamps. Bits 0 and 4 of each expander bank
//! are sensor inputs and are never set.

use super::group::{Colour, GroupId, GROUP_COUNT};

const GREEN: u32 = 0x02;
const YELLOW: u32 = 0x04;
const RED: u32 = 0x08;

/// Packed lamp vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LampState(pub u32);

impl LampState {
    pub const DARK: Self = LampState(0);

    /// Project group colours (in `GroupId::ALL` order) onto lamp bits
    pub fn from_colours(colours: &[Colour; GROUP_COUNT]) -> Self {
        let bits = GroupId::ALL
            .iter()
            .zip(colours.iter())
            .fold(0u32, |acc, (&id, &colour)| acc | lamp_bits(id, colour));
        LampState(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn bank_a(self) -> u8 {
        self.0 as u8
    }

    pub fn bank_b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn aux(self) -> u8 {
        (self.0 >> 16) as u8
    }
}

/// Bit offset of a group's lamp head within the packed word
fn head_shift(id: GroupId) -> u32 {
    match id {
        GroupId::SideB => 0,
        GroupId::ThroughWest => 4,
        GroupId::Turn => 8,
        GroupId::ThroughEast => 12,
        GroupId::SideA => 16,
    }
}

fn lamp_bits(id: GroupId, colour: Colour) -> u32 {
    let lamp = match colour {
        Colour::Off => return 0,
        Colour::Green => GREEN,
        Colour::Yellow => YELLOW,
        Colour::Red => RED,
    };
    lamp << head_shift(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENSOR_BITS: u8 = 0x11;

    #[test]
    fn test_default_phase_layout() {
        // ThroughWest, ThroughEast green; Turn, SideA, SideB red
        let lamps = LampState::from_colours(&[
            Colour::Green,
            Colour::Green,
            Colour::Red,
            Colour::Red,
            Colour::Red,
        ]);
        assert_eq!(lamps.bank_a(), 0x20 | 0x08);
        assert_eq!(lamps.bank_b(), 0x20 | 0x08);
        assert_eq!(lamps.aux(), 0x08);
    }

    #[test]
    fn test_hazard_layout() {
        let lit = LampState::from_colours(&[Colour::Yellow; GROUP_COUNT]);
        assert_eq!(lit.bank_a(), 0x44);
        assert_eq!(lit.bank_b(), 0x44);
        assert_eq!(lit.aux(), 0x04);

        let dark = LampState::from_colours(&[Colour::Off; GROUP_COUNT]);
        assert_eq!(dark, LampState::DARK);
    }

    #[test]
    fn test_sensor_bits_never_driven() {
        for colour in [Colour::Off, Colour::Red, Colour::Yellow, Colour::Green] {
            let lamps = LampState::from_colours(&[colour; GROUP_COUNT]);
            assert_eq!(lamps.bank_a() & SENSOR_BITS, 0);
            assert_eq!(lamps.bank_b() & SENSOR_BITS, 0);
            assert_eq!(lamps.bits() >> 24, 0);
        }
    }
}
