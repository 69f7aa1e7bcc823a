//! Time-based input debounce
//!
//! A raw level that differs from the accepted level must persist for the
//! debounce window, measured from the first differing sample, before it is
//! accepted. Any sample back at the accepted level restarts the wait.

use crate::clock::Millis;

/// Minimum persistence of a level change (ms)
pub const DEBOUNCE_WINDOW_MS: u32 = 50;

/// Accepted level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

/// Debounce state for one input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceEntry {
    stable_level: bool,
    /// Time of the first sample that disagreed with `stable_level`
    last_change: Option<Millis>,
}

impl DebounceEntry {
    pub const fn new(level: bool) -> Self {
        Self {
            stable_level: level,
            last_change: None,
        }
    }

    pub fn stable_level(&self) -> bool {
        self.stable_level
    }

    /// Feed one raw sample, returning the edge if the change is accepted
    pub fn sample(&mut self, raw: bool, now: Millis) -> Option<Edge> {
        if raw == self.stable_level {
            self.last_change = None;
            return None;
        }

        match self.last_change {
            None => {
                self.last_change = Some(now);
                None
            }
            Some(since) if now.has_elapsed(since, DEBOUNCE_WINDOW_MS) => {
                self.stable_level = raw;
                self.last_change = None;
                Some(if raw { Edge::Rising } else { Edge::Falling })
            }
            Some(_) => None,
        }
    }
}
