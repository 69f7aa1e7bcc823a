//! Blocking delays
//!
//! Used by drivers whose power-up sequences need fixed settle times.

/// Blocking delay provider
pub trait DelayUs {
    /// Busy-wait for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Busy-wait for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}
