//! Hardware abstraction traits
//!
//! These traits define the interface between the controller logic and
//! the board-specific input, output and timing implementations.

pub mod clock;
pub mod output;
pub mod sensor;

pub use clock::Clock;
pub use output::{Buzzer, LampOutput};
pub use sensor::SensorBus;
