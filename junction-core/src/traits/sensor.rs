//! Sensor bus trait

use crate::sensor::SensorLevels;

/// Source of raw controller input levels
///
/// Implementations translate their wiring polarity so that `true` always
/// means the input is active.
pub trait SensorBus {
    type Error;

    /// Sample every demand sensor and the hazard input once
    fn read_levels(&mut self) -> Result<SensorLevels, Self::Error>;
}
