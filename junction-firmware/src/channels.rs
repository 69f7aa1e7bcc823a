//! Inter-task communication
//!
//! The control loop owns all controller state. Other tasks only publish
//! the live time period and wake the loop on a demand edge.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

/// Current time period in milliseconds (written by the period task)
pub static TIME_PERIOD_MS: AtomicU32 = AtomicU32::new(0);

/// Raised when the port expander reports a sensor change
pub static DEMAND_EDGE: Signal<CriticalSectionRawMutex, ()> = Signal::new();
