//! Lamp and audible outputs

use crate::signal::LampState;

/// Sink for the packed lamp word
pub trait LampOutput {
    type Error;

    /// Drive every lamp to match `lamps`
    fn write_lamps(&mut self, lamps: LampState) -> Result<(), Self::Error>;
}

/// Audible hazard indicator
pub trait Buzzer {
    /// Turn the buzzer on or off
    fn set_active(&mut self, active: bool);

    /// Check if the buzzer is currently sounding
    fn is_active(&self) -> bool;
}
