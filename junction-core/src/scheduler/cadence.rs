//! Control loop cadence
//!
//! The cooperative loop runs four jobs, each on its own next-due
//! deadline. Sensor sampling can also be pulled forward by a demand edge.

use crate::clock::{Interval, Millis};
use crate::config::LoopConfig;

/// Jobs due on one loop pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DueJobs {
    pub sample: bool,
    pub tick: bool,
    pub output: bool,
    pub display: bool,
}

impl DueJobs {
    pub fn any(&self) -> bool {
        self.sample || self.tick || self.output || self.display
    }
}

/// Next-due deadlines for every loop job
#[derive(Debug, Clone)]
pub struct Cadence {
    sample: Interval,
    tick: Interval,
    output: Interval,
    display: Interval,
}

impl Cadence {
    /// Create a cadence with every job due at `start`
    pub fn new(config: &LoopConfig, start: Millis) -> Self {
        Self {
            sample: Interval::new(config.sensor_ms, start),
            tick: Interval::new(config.scheduler_ms, start),
            output: Interval::new(config.output_ms, start),
            display: Interval::new(config.display_ms, start),
        }
    }

    /// Collect and re-arm the jobs due at `now`
    pub fn poll(&mut self, now: Millis) -> DueJobs {
        DueJobs {
            sample: self.sample.poll(now),
            tick: self.tick.poll(now),
            output: self.output.poll(now),
            display: self.display.poll(now),
        }
    }

    /// Pull the next sensor sample forward to `now`
    pub fn request_sample(&mut self, now: Millis) {
        self.sample.trigger(now);
    }
}
