//! Events reported by the phase scheduler

use super::machine::Phase;

/// Phase transitions surfaced to the firmware for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A different service phase was granted
    PhaseStarted { from: Phase, to: Phase },
    /// Hazard input asserted; all groups flashing
    HazardEntered { from: Phase },
    /// Hazard input stayed clear for the hold time; controller reset to Default
    HazardCleared,
}
