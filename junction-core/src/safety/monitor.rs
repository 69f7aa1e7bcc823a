//! Hazard supervisor
//!
//! Tracks the debounced hazard input, the clear-hold timer and the amber
//! flash cadence. The controller powers up in hazard mode and only leaves
//! it after the input has stayed clear for the hold time.

use crate::clock::Millis;
use crate::config::HAZARD_FLASH_MS;
use crate::sensor::{DebounceEntry, Edge};

/// Result of one supervisor update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HazardStatus {
    /// No hazard; normal phase scheduling runs
    Inactive,
    /// Hazard input just asserted during normal operation
    Entered,
    /// Hazard mode in effect, waiting for the input to clear long enough
    Holding,
    /// Input clear for the full hold; hazard mode ends now
    Cleared,
}

/// Hazard mode tracking
#[derive(Debug, Clone)]
pub struct HazardSupervisor {
    input: DebounceEntry,
    /// Debounced assertion not yet seen by `update`
    pending_entry: bool,
    active: bool,
    /// Start of the current clear stretch while active
    clear_since: Option<Millis>,
    hold_ms: u32,
    last_toggle: Millis,
    /// Flash half-cycle: amber lit or dark
    lit: bool,
}

impl HazardSupervisor {
    /// Create a supervisor in the power-up hazard state
    pub fn new(hold_ms: u32) -> Self {
        Self {
            input: DebounceEntry::new(false),
            pending_entry: false,
            active: true,
            clear_since: None,
            hold_ms,
            last_toggle: Millis::ZERO,
            lit: true,
        }
    }

    /// Feed one raw sample of the hazard input (true = asserted)
    ///
    /// An accepted assertion is latched until the next `update`, so a
    /// pulse shorter than the tick interval still enters hazard mode.
    pub fn sample(&mut self, raw: bool, now: Millis) {
        if let Some(Edge::Rising) = self.input.sample(raw, now) {
            self.pending_entry = true;
        }
    }

    pub fn input_asserted(&self) -> bool {
        self.input.stable_level()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn hold_ms(&self) -> u32 {
        self.hold_ms
    }

    /// Advance hazard mode for one scheduler tick
    pub fn update(&mut self, now: Millis) -> HazardStatus {
        let pending = core::mem::take(&mut self.pending_entry);
        if self.input_asserted() || pending {
            self.clear_since = None;
            if self.active {
                return HazardStatus::Holding;
            }
            self.active = true;
            self.start_flash(now);
            return HazardStatus::Entered;
        }

        if !self.active {
            return HazardStatus::Inactive;
        }

        match self.clear_since {
            Some(since) if now.has_elapsed(since, self.hold_ms) => {
                self.active = false;
                self.clear_since = None;
                HazardStatus::Cleared
            }
            Some(_) => HazardStatus::Holding,
            None => {
                self.clear_since = Some(now);
                HazardStatus::Holding
            }
        }
    }

    /// Restart the flash cycle with the lamps lit
    pub fn start_flash(&mut self, now: Millis) {
        self.lit = true;
        self.last_toggle = now;
    }

    /// Toggle the flash if a half-cycle has passed
    ///
    /// Returns the new lit state when it changes.
    pub fn flash(&mut self, now: Millis) -> Option<bool> {
        if !now.has_elapsed(self.last_toggle, HAZARD_FLASH_MS) {
            return None;
        }
        self.lit = !self.lit;
        self.last_toggle = now;
        Some(self.lit)
    }

    /// Audible indicator sounds during the dark half of the flash
    pub fn buzzer_active(&self) -> bool {
        self.active && !self.lit
    }
}
