//! Busy-wait delays

use embassy_time::{block_for, Duration};
use junction_hal::DelayUs;

/// Blocking delay on the embassy time driver
///
/// Only for short settle times; it stalls the executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyDelay;

impl DelayUs for EmbassyDelay {
    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }
}
