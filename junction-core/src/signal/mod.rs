//! Signal groups
//!
//! Per-movement lamp state, dwell timing and the projection onto lamp
//! output bits.

pub mod group;
pub mod lamps;

pub use group::{Colour, GroupId, PhaseTiming, SignalGroup, SignalGroups, GROUP_COUNT};
pub use lamps::LampState;
