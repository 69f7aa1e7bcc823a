//! GPIO buzzer output
//!
//! Drives a self-oscillating piezo buzzer from a single pin, directly or
//! through a transistor.

use junction_core::traits::Buzzer;
use junction_hal::{ActiveLevel, OutputPin};

/// GPIO buzzer
pub struct GpioBuzzer<P> {
    pin: P,
    level: ActiveLevel,
    active: bool,
}

impl<P: OutputPin> GpioBuzzer<P> {
    /// Create a buzzer output, initially silent
    pub fn new(pin: P, level: ActiveLevel) -> Self {
        let mut buzzer = Self {
            pin,
            level,
            active: false,
        };
        buzzer.set_active(false);
        buzzer
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, ActiveLevel::High)
    }
}

impl<P: OutputPin> Buzzer for GpioBuzzer<P> {
    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.pin.set_state(self.level.level_for(active));
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
