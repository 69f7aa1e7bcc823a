//! Phase definitions
//!
//! A phase is a set of mutually compatible signal groups granted green
//! together. Every signal decision is a function of the current phase,
//! the sensor latches and the group timestamps.

use crate::signal::GroupId;

/// Controller phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// All groups flashing amber; entered at power-up and on hazard input
    Hazard,
    /// Through traffic in both directions
    Default,
    /// Protected turn plus the westbound through movement
    TurnPhase,
    /// First side street
    SideStreetA,
    /// Second side street, highest priority
    SideStreetB,
}

impl Phase {
    /// Service phases, highest priority first
    pub const SERVICE: [Phase; 4] = [
        Phase::SideStreetB,
        Phase::SideStreetA,
        Phase::TurnPhase,
        Phase::Default,
    ];

    /// Signal groups granted green in this phase
    pub fn groups(self) -> &'static [GroupId] {
        match self {
            Phase::Hazard => &GroupId::ALL,
            Phase::Default => &[GroupId::ThroughWest, GroupId::ThroughEast],
            Phase::TurnPhase => &[GroupId::Turn, GroupId::ThroughWest],
            Phase::SideStreetA => &[GroupId::SideA],
            Phase::SideStreetB => &[GroupId::SideB],
        }
    }

    /// Sensors whose demand this phase serves
    pub fn sensors(self) -> &'static [usize] {
        match self {
            Phase::Hazard => &[],
            Phase::Default => &[1, 3],
            Phase::TurnPhase => &[2],
            Phase::SideStreetA => &[4],
            Phase::SideStreetB => &[0],
        }
    }

    pub fn owns(self, group: GroupId) -> bool {
        self.groups().contains(&group)
    }

    /// Priority rank among service phases; hazard outranks everything
    pub fn rank(self) -> u8 {
        match self {
            Phase::Default => 0,
            Phase::TurnPhase => 1,
            Phase::SideStreetA => 2,
            Phase::SideStreetB => 3,
            Phase::Hazard => u8::MAX,
        }
    }

    pub fn outranks(self, other: Phase) -> bool {
        self.rank() > other.rank()
    }

    /// Three-letter code for the status display
    pub fn code(self) -> &'static str {
        match self {
            Phase::Hazard => "HZD",
            Phase::Default => "THR",
            Phase::TurnPhase => "TRN",
            Phase::SideStreetA => "SSA",
            Phase::SideStreetB => "SSB",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(Phase::SideStreetB.outranks(Phase::SideStreetA));
        assert!(Phase::SideStreetA.outranks(Phase::TurnPhase));
        assert!(Phase::TurnPhase.outranks(Phase::Default));
        assert!(Phase::Hazard.outranks(Phase::SideStreetB));
        assert!(Phase::SERVICE.windows(2).all(|w| w[0].outranks(w[1])));
    }

    #[test]
    fn test_sensors_match_owned_groups() {
        for phase in Phase::SERVICE {
            for &sensor in phase.sensors() {
                let group = GroupId::from_sensor(sensor);
                assert!(group.is_some_and(|g| phase.owns(g)));
            }
        }
    }

    #[test]
    fn test_shared_group() {
        assert!(Phase::Default.owns(GroupId::ThroughWest));
        assert!(Phase::TurnPhase.owns(GroupId::ThroughWest));
        assert!(!Phase::TurnPhase.owns(GroupId::ThroughEast));
        assert_eq!(Phase::Hazard.groups().len(), 5);
    }
}
