//! Phase state machine
//!
//! Defines the phases, their owned groups and served sensors, and the
//! events reported when the controller changes phase.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Phase;
