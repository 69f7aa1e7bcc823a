//! Safety supervision
//!
//! Hazard mode overrides all phase scheduling.

pub mod monitor;

pub use monitor::{HazardStatus, HazardSupervisor};
