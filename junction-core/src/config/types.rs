//! Configuration type definitions
//!
//! These types describe signal timing and loop cadence. The firmware bakes
//! them from `controller.toml` into postcard bytes at build time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::signal::GroupId;
use crate::state::Phase;

/// Amber duration in time-periods
pub const AMBER_PERIODS: u32 = 2;

/// All-red clearance in time-periods before a conflicting grant
pub const CLEARANCE_PERIODS: u32 = 2;

/// Hazard flash half-cycle (ms)
pub const HAZARD_FLASH_MS: u32 = 1000;

/// Default hazard-clear hold (ms)
pub const DEFAULT_HAZARD_HOLD_MS: u32 = 3000;

/// Minimum and maximum green dwell for one phase, in time-periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseLimits {
    pub min_green_periods: u8,
    pub max_green_periods: u8,
}

impl PhaseLimits {
    pub const fn new(min_green_periods: u8, max_green_periods: u8) -> Self {
        Self {
            min_green_periods,
            max_green_periods,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min_green_periods >= 1 && self.min_green_periods <= self.max_green_periods
    }
}

/// Range of the operator time-period potentiometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimePeriodConfig {
    /// Period at ADC zero (ms)
    pub min_ms: u32,
    /// Period at ADC full scale (ms)
    pub max_ms: u32,
    /// ADC full-scale reading
    pub adc_max: u16,
    /// Period used until the first sample arrives (ms)
    pub initial_ms: u32,
}

impl Default for TimePeriodConfig {
    fn default() -> Self {
        Self {
            min_ms: 50,
            max_ms: 1000,
            adc_max: 4095,
            initial_ms: 1000,
        }
    }
}

impl TimePeriodConfig {
    /// Scale a raw ADC reading to a period in milliseconds
    ///
    /// Readings above `adc_max` saturate at `max_ms`.
    pub fn scale(&self, raw: u16) -> u32 {
        if self.adc_max == 0 {
            return self.min_ms;
        }
        let raw = u64::from(raw.min(self.adc_max));
        let span = u64::from(self.max_ms.saturating_sub(self.min_ms));
        self.min_ms + (raw * span / u64::from(self.adc_max)) as u32
    }
}

/// Signal timing for all phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Shared by both through groups
    pub through: PhaseLimits,
    pub turn: PhaseLimits,
    pub side_a: PhaseLimits,
    pub side_b: PhaseLimits,
    /// Hazard input must stay clear this long before normal operation resumes
    pub hazard_hold_ms: u32,
    pub period: TimePeriodConfig,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            through: PhaseLimits::new(4, 6),
            turn: PhaseLimits::new(2, 4),
            side_a: PhaseLimits::new(2, 3),
            side_b: PhaseLimits::new(2, 4),
            hazard_hold_ms: DEFAULT_HAZARD_HOLD_MS,
            period: TimePeriodConfig::default(),
        }
    }
}

impl TimingConfig {
    /// Limits that apply to a signal group
    pub fn limits_for(&self, group: GroupId) -> PhaseLimits {
        match group {
            GroupId::ThroughWest | GroupId::ThroughEast => self.through,
            GroupId::Turn => self.turn,
            GroupId::SideA => self.side_a,
            GroupId::SideB => self.side_b,
        }
    }

    /// Limits configured for a phase, `None` for hazard
    pub fn limits_for_phase(&self, phase: Phase) -> Option<PhaseLimits> {
        match phase {
            Phase::Hazard => None,
            Phase::Default => Some(self.through),
            Phase::TurnPhase => Some(self.turn),
            Phase::SideStreetA => Some(self.side_a),
            Phase::SideStreetB => Some(self.side_b),
        }
    }
}

/// Cadence of the cooperative control loop (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoopConfig {
    pub sensor_ms: u32,
    pub scheduler_ms: u32,
    pub output_ms: u32,
    pub display_ms: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            sensor_ms: 10,
            scheduler_ms: 100,
            output_ms: 10,
            display_ms: 100,
        }
    }
}

impl LoopConfig {
    pub fn all_nonzero(&self) -> bool {
        self.sensor_ms > 0 && self.scheduler_ms > 0 && self.output_ms > 0 && self.display_ms > 0
    }
}
