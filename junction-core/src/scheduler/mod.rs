//! Phase scheduler
//!
//! Selects, gates and times phases, and drives the control loop cadence.

pub mod arbiter;
pub mod cadence;
pub mod executor;

pub use arbiter::{gate_open, pending_phases, pending_rival, select_candidate};
pub use cadence::{Cadence, DueJobs};
pub use executor::{PhaseScheduler, StatusSnapshot};
