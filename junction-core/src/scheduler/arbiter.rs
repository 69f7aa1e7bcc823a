//! Phase arbitration
//!
//! Picks the phase that should be served next and decides whether the
//! current phase has cleared far enough to hand over to it.

use heapless::Vec;

use crate::clock::Millis;
use crate::sensor::SensorTracker;
use crate::signal::SignalGroups;
use crate::state::Phase;

/// Service phases with an unserved sensor, highest priority first
pub fn pending_phases(sensors: &SensorTracker) -> Vec<Phase, 4> {
    Phase::SERVICE
        .iter()
        .copied()
        .filter(|phase| phase.sensors().iter().any(|&s| sensors.needs_handling(s)))
        .collect()
}

/// Highest-priority pending phase, or Default when nothing else waits
pub fn select_candidate(sensors: &SensorTracker) -> Phase {
    pending_phases(sensors)
        .first()
        .copied()
        .unwrap_or(Phase::Default)
}

/// Highest pending phase that outranks `current`
pub fn pending_rival(current: Phase, sensors: &SensorTracker) -> Option<Phase> {
    pending_phases(sensors)
        .into_iter()
        .find(|phase| phase.outranks(current))
}

/// Check whether `candidate` may be granted now
///
/// No group may be amber, and every group of `current` that `candidate`
/// does not also own must have shown red for the clearance interval. A
/// re-grant of `current` checks all of its groups.
pub fn gate_open(
    current: Phase,
    candidate: Phase,
    groups: &SignalGroups,
    now: Millis,
    period_ms: u32,
) -> bool {
    if groups.any_yellow() {
        return false;
    }
    current
        .groups()
        .iter()
        .filter(|&&g| candidate == current || !candidate.owns(g))
        .all(|&g| groups.is_cleared(g, now, period_ms))
}
