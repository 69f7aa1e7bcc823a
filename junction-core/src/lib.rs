//! Board-agnostic core logic for the traffic signal controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Wrapping millisecond clock arithmetic and loop cadence
//! - Sensor debounce and demand tracking
//! - Signal groups, dwell bookkeeping and lamp projection
//! - Phase state machine with priority arbitration
//! - Hazard supervision
//! - Configuration type definitions
//! - Collaborator traits (sensor bus, lamp output, buzzer, clock)

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod safety;
pub mod scheduler;
pub mod sensor;
pub mod signal;
pub mod state;
pub mod traits;
