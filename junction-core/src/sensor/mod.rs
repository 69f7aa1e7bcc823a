//! Demand sensors
//!
//! Debounce and demand latching for the six logical sensors plus the
//! dedicated hazard input.

pub mod debounce;
pub mod tracker;

pub use debounce::{DebounceEntry, Edge, DEBOUNCE_WINDOW_MS};
pub use tracker::{SensorTracker, SENSOR_COUNT};

/// One raw sample of every controller input (true = active)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorLevels {
    pub sensors: [bool; SENSOR_COUNT],
    pub hazard: bool,
}

impl SensorLevels {
    pub const IDLE: Self = SensorLevels {
        sensors: [false; SENSOR_COUNT],
        hazard: false,
    };
}
