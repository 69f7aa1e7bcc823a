//! Sensor demand tracking
//!
//! Each logical sensor carries two latches on top of its debounced level:
//!
//! - `triggered`: an accepted press is waiting to be served
//! - `handled`: the press has been served by a phase grant
//!
//! A sensor needs handling while it is triggered but not yet handled. The
//! handled latch is released once the sensor's level is inactive again, so
//! a fresh press after service re-arms the sensor.

use crate::clock::Millis;
use crate::signal::{GroupId, SignalGroups};

use super::debounce::{DebounceEntry, Edge};

/// Number of logical demand sensors
pub const SENSOR_COUNT: usize = 6;

/// Demand latches and debounce state for every sensor
#[derive(Debug, Clone)]
pub struct SensorTracker {
    triggered: u8,
    handled: u8,
    entries: [DebounceEntry; SENSOR_COUNT],
}

impl Default for SensorTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorTracker {
    pub const fn new() -> Self {
        Self {
            triggered: 0,
            handled: 0,
            entries: [DebounceEntry::new(false); SENSOR_COUNT],
        }
    }

    /// Run one sampling pass over raw sensor levels (true = active)
    ///
    /// Accepted edges update the mapped group's demand flag.
    pub fn update(&mut self, levels: &[bool; SENSOR_COUNT], now: Millis, groups: &mut SignalGroups) {
        for (i, &raw) in levels.iter().enumerate() {
            let bit = 1u8 << i;

            if !self.entries[i].stable_level() {
                self.handled &= !bit;
            }

            match self.entries[i].sample(raw, now) {
                Some(Edge::Rising) => {
                    if let Some(group) = GroupId::from_sensor(i) {
                        groups.set_demand(group, true);
                    }
                    if self.handled & bit == 0 {
                        self.triggered |= bit;
                    }
                }
                Some(Edge::Falling) => {
                    if let Some(group) = GroupId::from_sensor(i) {
                        groups.set_demand(group, false);
                    }
                    if !self.needs_handling(i) {
                        self.triggered &= !bit;
                    }
                }
                None => {}
            }
        }
    }

    /// Record that a phase grant has served this sensor
    ///
    /// Out-of-range indices are ignored.
    pub fn mark_handled(&mut self, sensor: usize) {
        if sensor >= SENSOR_COUNT {
            return;
        }
        let bit = 1u8 << sensor;
        self.handled |= bit;
        if !self.entries[sensor].stable_level() {
            self.triggered &= !bit;
        }
    }

    /// True if the sensor has an unserved press
    pub fn needs_handling(&self, sensor: usize) -> bool {
        if sensor >= SENSOR_COUNT {
            return false;
        }
        let bit = 1u8 << sensor;
        self.triggered & bit != 0 && self.handled & bit == 0
    }

    /// Drop every pending and served latch
    pub fn clear_all(&mut self) {
        self.triggered = 0;
        self.handled = 0;
    }

    pub fn is_triggered(&self, sensor: usize) -> bool {
        sensor < SENSOR_COUNT && self.triggered & (1 << sensor) != 0
    }

    pub fn is_handled(&self, sensor: usize) -> bool {
        sensor < SENSOR_COUNT && self.handled & (1 << sensor) != 0
    }

    /// Debounced level of a sensor
    pub fn stable_level(&self, sensor: usize) -> bool {
        self.entries
            .get(sensor)
            .map(DebounceEntry::stable_level)
            .unwrap_or(false)
    }

    pub fn triggered_mask(&self) -> u8 {
        self.triggered
    }

    pub fn handled_mask(&self) -> u8 {
        self.handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;

    fn levels_with(sensor: usize) -> [bool; SENSOR_COUNT] {
        let mut levels = [false; SENSOR_COUNT];
        levels[sensor] = true;
        levels
    }

    /// Hold the given levels for 60 ms starting at `start`
    fn settle(
        tracker: &mut SensorTracker,
        groups: &mut SignalGroups,
        levels: [bool; SENSOR_COUNT],
        start: u32,
    ) {
        for t in (start..=start + 60).step_by(10) {
            tracker.update(&levels, Millis(t), groups);
        }
    }

    #[test]
    fn test_press_sets_demand_and_trigger() {
        let mut tracker = SensorTracker::new();
        let mut groups = SignalGroups::new(&TimingConfig::default());

        settle(&mut tracker, &mut groups, levels_with(0), 0);

        assert!(tracker.needs_handling(0));
        assert!(groups.group(GroupId::SideB).demand);
        assert!(!tracker.needs_handling(1));
    }

    #[test]
    fn test_short_glitch_ignored() {
        let mut tracker = SensorTracker::new();
        let mut groups = SignalGroups::new(&TimingConfig::default());

        for t in (0..40).step_by(10) {
            tracker.update(&levels_with(4), Millis(t), &mut groups);
        }
        tracker.update(&[false; SENSOR_COUNT], Millis(40), &mut groups);

        assert!(!tracker.is_triggered(4));
        assert!(!groups.group(GroupId::SideA).demand);
    }

    #[test]
    fn test_released_press_stays_pending() {
        let mut tracker = SensorTracker::new();
        let mut groups = SignalGroups::new(&TimingConfig::default());

        settle(&mut tracker, &mut groups, levels_with(2), 0);
        settle(&mut tracker, &mut groups, [false; SENSOR_COUNT], 100);

        assert!(!groups.group(GroupId::Turn).demand);
        assert!(tracker.needs_handling(2));
    }

    #[test]
    fn test_mark_handled_clears_inactive_trigger() {
        let mut tracker = SensorTracker::new();
        let mut groups = SignalGroups::new(&TimingConfig::default());

        settle(&mut tracker, &mut groups, levels_with(2), 0);
        settle(&mut tracker, &mut groups, [false; SENSOR_COUNT], 100);
        tracker.mark_handled(2);

        assert!(!tracker.is_triggered(2));
        assert!(!tracker.needs_handling(2));
    }

    #[test]
    fn test_mark_handled_idempotent() {
        let mut tracker = SensorTracker::new();
        let mut groups = SignalGroups::new(&TimingConfig::default());

        settle(&mut tracker, &mut groups, levels_with(0), 0);
        tracker.mark_handled(0);
        let once = (tracker.triggered_mask(), tracker.handled_mask());
        tracker.mark_handled(0);
        assert_eq!((tracker.triggered_mask(), tracker.handled_mask()), once);
    }

    #[test]
    fn test_mark_handled_idempotent_when_inactive() {
        let mut tracker = SensorTracker::new();
        let mut groups = SignalGroups::new(&TimingConfig::default());

        // Pressed and released before the grant
        settle(&mut tracker, &mut groups, levels_with(2), 0);
        settle(&mut tracker, &mut groups, [false; SENSOR_COUNT], 100);
        assert!(!tracker.stable_level(2));
        assert!(tracker.needs_handling(2));

        tracker.mark_handled(2);
        let once = (tracker.triggered_mask(), tracker.handled_mask());
        assert_eq!(once, (0, 1 << 2));
        tracker.mark_handled(2);
        assert_eq!((tracker.triggered_mask(), tracker.handled_mask()), once);

        // Next pass with the sensor inactive releases the served latch
        tracker.update(&[false; SENSOR_COUNT], Millis(200), &mut groups);
        assert!(!tracker.is_handled(2));
        assert_eq!(tracker.handled_mask(), 0);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut tracker = SensorTracker::new();
        tracker.mark_handled(6);
        tracker.mark_handled(usize::MAX);
        assert_eq!(tracker.handled_mask(), 0);
        assert!(!tracker.needs_handling(6));
        assert!(!tracker.stable_level(17));
    }

    #[test]
    fn test_handled_released_after_inactive() {
        let mut tracker = SensorTracker::new();
        let mut groups = SignalGroups::new(&TimingConfig::default());

        // Served while held
        settle(&mut tracker, &mut groups, levels_with(4), 0);
        tracker.mark_handled(4);
        assert!(tracker.is_handled(4));

        // Held sensors keep their served latch
        settle(&mut tracker, &mut groups, levels_with(4), 100);
        assert!(tracker.is_handled(4));

        // Release clears trigger once inactive
        settle(&mut tracker, &mut groups, [false; SENSOR_COUNT], 200);
        assert!(!tracker.is_triggered(4));

        // A fresh press re-arms it
        settle(&mut tracker, &mut groups, levels_with(4), 300);
        assert!(tracker.needs_handling(4));
    }

    #[test]
    fn test_aux_sensor_has_no_group() {
        let mut tracker = SensorTracker::new();
        let mut groups = SignalGroups::new(&TimingConfig::default());

        settle(&mut tracker, &mut groups, levels_with(5), 0);

        assert!(tracker.needs_handling(5));
        assert!(GroupId::ALL.iter().all(|&g| !groups.group(g).demand));
    }

    #[test]
    fn test_clear_all() {
        let mut tracker = SensorTracker::new();
        let mut groups = SignalGroups::new(&TimingConfig::default());

        settle(&mut tracker, &mut groups, [true; SENSOR_COUNT], 0);
        tracker.mark_handled(1);
        tracker.clear_all();

        assert_eq!(tracker.triggered_mask(), 0);
        assert_eq!(tracker.handled_mask(), 0);
    }
}
