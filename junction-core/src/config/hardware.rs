//! Top-level controller configuration
//!
//! Combines timing, loop cadence and the board-level display settings into
//! the single structure the firmware loads at boot.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{LoopConfig, TimingConfig};
use crate::state::Phase;

/// Config format version understood by this firmware
pub const CONFIG_VERSION: u8 = 1;

/// Number of LCD backpack addresses probed at boot
pub const MAX_DISPLAY_ADDRESSES: usize = 3;

/// Status LCD bus settings
///
/// Addresses are probed in order. A zero entry is an unused slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayHwConfig {
    pub addresses: [u8; MAX_DISPLAY_ADDRESSES],
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            addresses: [0x27, 0x3F, 0x20],
        }
    }
}

impl DisplayHwConfig {
    /// Configured addresses in probe order, skipping unused slots
    pub fn probe_order(&self) -> Vec<u8, MAX_DISPLAY_ADDRESSES> {
        self.addresses.iter().copied().filter(|&a| a != 0).collect()
    }
}

/// Configuration validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Config was written for a different firmware format
    VersionMismatch(u8),
    /// Minimum green is zero or exceeds maximum green
    InvalidPhaseLimits(Phase),
    /// Time-period range is empty or the ADC full scale is zero
    InvalidPeriodRange,
    /// Hazard hold must be non-zero
    InvalidHazardHold,
    /// A loop interval is zero
    ZeroInterval,
    /// No LCD address configured
    NoDisplayAddress,
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    pub version: u8,
    pub timing: TimingConfig,
    pub tasks: LoopConfig,
    pub display: DisplayHwConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            timing: TimingConfig::default(),
            tasks: LoopConfig::default(),
            display: DisplayHwConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Check the configuration for values the scheduler cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch(self.version));
        }

        for phase in Phase::SERVICE {
            let valid = self
                .timing
                .limits_for_phase(phase)
                .is_some_and(|limits| limits.is_valid());
            if !valid {
                return Err(ConfigError::InvalidPhaseLimits(phase));
            }
        }

        let period = &self.timing.period;
        if period.min_ms == 0 || period.min_ms > period.max_ms || period.adc_max == 0 {
            return Err(ConfigError::InvalidPeriodRange);
        }

        if self.timing.hazard_hold_ms == 0 {
            return Err(ConfigError::InvalidHazardHold);
        }

        if !self.tasks.all_nonzero() {
            return Err(ConfigError::ZeroInterval);
        }

        if self.display.probe_order().is_empty() {
            return Err(ConfigError::NoDisplayAddress);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhaseLimits;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let mut config = ControllerConfig::default();
        config.timing.side_a = PhaseLimits::new(4, 3);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidPhaseLimits(Phase::SideStreetA))
        );
    }

    #[test]
    fn test_rejects_empty_period_range() {
        let mut config = ControllerConfig::default();
        config.timing.period.min_ms = 2000;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPeriodRange));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let mut config = ControllerConfig::default();
        config.tasks.output_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn test_probe_order_skips_unused() {
        let mut config = ControllerConfig::default();
        config.display.addresses = [0, 0x3F, 0];
        assert_eq!(config.display.probe_order().as_slice(), &[0x3F]);

        config.display.addresses = [0; MAX_DISPLAY_ADDRESSES];
        assert_eq!(config.validate(), Err(ConfigError::NoDisplayAddress));
    }

    #[test]
    fn test_rejects_version_mismatch() {
        let config = ControllerConfig {
            version: 7,
            ..ControllerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::VersionMismatch(7)));
    }
}
