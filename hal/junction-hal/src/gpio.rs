//! GPIO pin abstractions
//!
//! Digital inputs carry vehicle sensors and the hazard switch; digital
//! outputs drive lamps, the buzzer and the diagnostic LED.

/// Electrical level that means "asserted"
///
/// Sensor loops and push buttons on the controller board pull the line low
/// when active; lamp drivers are active-high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    #[default]
    High,
    Low,
}

impl ActiveLevel {
    /// Translate an electrical level into a logical one
    pub fn is_asserted(self, high: bool) -> bool {
        match self {
            ActiveLevel::High => high,
            ActiveLevel::Low => !high,
        }
    }

    /// Electrical level that produces the requested logical state
    pub fn level_for(self, asserted: bool) -> bool {
        self.is_asserted(asserted)
    }
}

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Read the logical level given the pin's active polarity
    fn is_active(&self, level: ActiveLevel) -> bool {
        level.is_asserted(self.is_high())
    }
}
