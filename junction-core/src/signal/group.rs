//! Signal groups and their dwell timing
//!
//! A signal group is one controlled movement with a single lamp head. The
//! controller owns a fixed array of five, indexed by [`GroupId`].

use crate::clock::Millis;
use crate::config::{TimingConfig, CLEARANCE_PERIODS};
use crate::state::Phase;

/// Number of signal groups at the junction
pub const GROUP_COUNT: usize = 5;

/// Lamp colour shown by a signal group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Colour {
    /// Dark, only reachable while hazard flashing
    Off,
    #[default]
    Red,
    Yellow,
    Green,
}

impl Colour {
    /// Single-character code for the status display
    pub fn code(self) -> char {
        match self {
            Colour::Off => '_',
            Colour::Red => 'R',
            Colour::Yellow => 'Y',
            Colour::Green => 'G',
        }
    }
}

/// Controlled movements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GroupId {
    ThroughWest,
    ThroughEast,
    Turn,
    SideA,
    SideB,
}

impl GroupId {
    pub const ALL: [GroupId; GROUP_COUNT] = [
        GroupId::ThroughWest,
        GroupId::ThroughEast,
        GroupId::Turn,
        GroupId::SideA,
        GroupId::SideB,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Logical sensor that requests this movement
    pub const fn sensor(self) -> usize {
        match self {
            GroupId::SideB => 0,
            GroupId::ThroughWest => 1,
            GroupId::Turn => 2,
            GroupId::ThroughEast => 3,
            GroupId::SideA => 4,
        }
    }

    /// Movement requested by a logical sensor, if it maps to one
    pub const fn from_sensor(sensor: usize) -> Option<GroupId> {
        match sensor {
            0 => Some(GroupId::SideB),
            1 => Some(GroupId::ThroughWest),
            2 => Some(GroupId::Turn),
            3 => Some(GroupId::ThroughEast),
            4 => Some(GroupId::SideA),
            _ => None,
        }
    }

    /// Two groups conflict unless some phase grants both together
    pub fn conflicts_with(self, other: GroupId) -> bool {
        if self == other {
            return false;
        }
        !Phase::SERVICE
            .iter()
            .any(|phase| phase.owns(self) && phase.owns(other))
    }
}

/// Lamp state and demand for one movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalGroup {
    pub colour: Colour,
    /// Mirrors the debounced level of the group's sensor
    pub demand: bool,
    /// Set when the group finishes amber and turns red
    pub phase_complete: bool,
}

/// Dwell timestamps and limits for one group
///
/// `current_periods` is meaningful only while the group is green.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseTiming {
    pub green_start: Millis,
    pub yellow_start: Millis,
    pub red_start: Millis,
    pub min_green_periods: u8,
    pub max_green_periods: u8,
    pub current_periods: u32,
}

/// The fixed set of signal groups with their timing
#[derive(Debug, Clone)]
pub struct SignalGroups {
    groups: [SignalGroup; GROUP_COUNT],
    timing: [PhaseTiming; GROUP_COUNT],
}

impl SignalGroups {
    /// Create the hazard-safe power-up state: every group amber
    pub fn new(config: &TimingConfig) -> Self {
        let group = SignalGroup {
            colour: Colour::Yellow,
            demand: false,
            phase_complete: true,
        };
        let timing = GroupId::ALL.map(|id| {
            let limits = config.limits_for(id);
            PhaseTiming {
                green_start: Millis::ZERO,
                yellow_start: Millis::ZERO,
                red_start: Millis::ZERO,
                min_green_periods: limits.min_green_periods,
                max_green_periods: limits.max_green_periods,
                current_periods: 0,
            }
        });
        Self {
            groups: [group; GROUP_COUNT],
            timing,
        }
    }

    pub fn group(&self, id: GroupId) -> &SignalGroup {
        &self.groups[id.index()]
    }

    pub fn timing(&self, id: GroupId) -> &PhaseTiming {
        &self.timing[id.index()]
    }

    pub(crate) fn timing_mut(&mut self, id: GroupId) -> &mut PhaseTiming {
        &mut self.timing[id.index()]
    }

    pub fn colour(&self, id: GroupId) -> Colour {
        self.groups[id.index()].colour
    }

    /// Colours of all groups in `GroupId::ALL` order
    pub fn colours(&self) -> [Colour; GROUP_COUNT] {
        self.groups.map(|g| g.colour)
    }

    pub fn set_demand(&mut self, id: GroupId, demand: bool) {
        self.groups[id.index()].demand = demand;
    }

    pub fn any_yellow(&self) -> bool {
        self.groups.iter().any(|g| g.colour == Colour::Yellow)
    }

    /// Check that a group has shown red for the full clearance interval
    pub fn is_cleared(&self, id: GroupId, now: Millis, period_ms: u32) -> bool {
        self.colour(id) == Colour::Red
            && now.has_elapsed(
                self.timing(id).red_start,
                CLEARANCE_PERIODS.saturating_mul(period_ms),
            )
    }

    /// Turn a group green and restart its dwell
    pub fn grant(&mut self, id: GroupId, now: Millis) {
        let group = &mut self.groups[id.index()];
        group.colour = Colour::Green;
        group.phase_complete = false;
        let timing = &mut self.timing[id.index()];
        timing.green_start = now;
        timing.current_periods = 0;
    }

    /// Start amber on a green group
    pub fn begin_amber(&mut self, id: GroupId, now: Millis) {
        if self.colour(id) == Colour::Green {
            self.groups[id.index()].colour = Colour::Yellow;
            self.timing[id.index()].yellow_start = now;
        }
    }

    /// Finish amber: the group shows red and its phase share is complete
    pub fn begin_red(&mut self, id: GroupId, now: Millis) {
        if self.colour(id) == Colour::Yellow {
            self.force_red(id, now);
        }
    }

    /// Show red immediately, used when leaving hazard mode
    pub fn force_red(&mut self, id: GroupId, now: Millis) {
        let group = &mut self.groups[id.index()];
        group.colour = Colour::Red;
        group.phase_complete = true;
        self.timing[id.index()].red_start = now;
    }

    /// Drive every group to the same colour (hazard flashing)
    pub fn set_all(&mut self, colour: Colour) {
        for group in self.groups.iter_mut() {
            group.colour = colour;
        }
    }

    /// Check whether two conflicting groups are green together
    pub fn has_conflicting_greens(&self) -> bool {
        GroupId::ALL.iter().enumerate().any(|(i, &a)| {
            GroupId::ALL[i + 1..].iter().any(|&b| {
                self.colour(a) == Colour::Green
                    && self.colour(b) == Colour::Green
                    && a.conflicts_with(b)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_mapping_round_trips() {
        for id in GroupId::ALL {
            assert_eq!(GroupId::from_sensor(id.sensor()), Some(id));
        }
        assert_eq!(GroupId::from_sensor(5), None);
        assert_eq!(GroupId::from_sensor(99), None);
    }

    #[test]
    fn test_conflicts() {
        assert!(!GroupId::ThroughWest.conflicts_with(GroupId::ThroughEast));
        assert!(!GroupId::ThroughWest.conflicts_with(GroupId::Turn));
        assert!(GroupId::ThroughEast.conflicts_with(GroupId::Turn));
        assert!(GroupId::SideA.conflicts_with(GroupId::SideB));
        assert!(GroupId::SideA.conflicts_with(GroupId::ThroughWest));
    }

    #[test]
    fn test_power_up_is_amber() {
        let groups = SignalGroups::new(&TimingConfig::default());
        assert!(groups.colours().iter().all(|&c| c == Colour::Yellow));
        assert_eq!(groups.timing(GroupId::ThroughEast).min_green_periods, 4);
        assert_eq!(groups.timing(GroupId::SideB).max_green_periods, 4);
    }

    #[test]
    fn test_colour_cycle() {
        let mut groups = SignalGroups::new(&TimingConfig::default());
        groups.force_red(GroupId::Turn, Millis(0));
        // Red cannot go straight to amber
        groups.begin_amber(GroupId::Turn, Millis(10));
        assert_eq!(groups.colour(GroupId::Turn), Colour::Red);

        groups.grant(GroupId::Turn, Millis(100));
        assert!(!groups.group(GroupId::Turn).phase_complete);
        groups.begin_amber(GroupId::Turn, Millis(200));
        assert_eq!(groups.timing(GroupId::Turn).yellow_start, Millis(200));
        groups.begin_red(GroupId::Turn, Millis(300));
        assert_eq!(groups.colour(GroupId::Turn), Colour::Red);
        assert_eq!(groups.timing(GroupId::Turn).red_start, Millis(300));
        assert!(groups.group(GroupId::Turn).phase_complete);
    }

    #[test]
    fn test_clearance() {
        let mut groups = SignalGroups::new(&TimingConfig::default());
        groups.force_red(GroupId::SideA, Millis(1000));
        assert!(!groups.is_cleared(GroupId::SideA, Millis(1499), 250));
        assert!(groups.is_cleared(GroupId::SideA, Millis(1500), 250));
    }

    #[test]
    fn test_conflicting_green_detection() {
        let mut groups = SignalGroups::new(&TimingConfig::default());
        for id in GroupId::ALL {
            groups.force_red(id, Millis(0));
        }
        groups.grant(GroupId::ThroughWest, Millis(0));
        groups.grant(GroupId::Turn, Millis(0));
        assert!(!groups.has_conflicting_greens());
        groups.grant(GroupId::ThroughEast, Millis(0));
        assert!(groups.has_conflicting_greens());
    }
}
