//! Millisecond time arithmetic
//!
//! The controller clock is a free-running 32-bit millisecond counter that
//! wraps roughly every 49.7 days. Every comparison goes through wrapping
//! subtraction, so a single wrap between two timestamps is harmless.

/// Timestamp from the monotonic millisecond counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    pub const ZERO: Self = Millis(0);

    pub const fn new(ms: u32) -> Self {
        Millis(ms)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`, tolerant of counter wrap
    pub const fn elapsed_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Check whether at least `duration_ms` has passed since `since`
    pub const fn has_elapsed(self, since: Millis, duration_ms: u32) -> bool {
        self.elapsed_since(since) >= duration_ms
    }

    pub const fn wrapping_add(self, ms: u32) -> Millis {
        Millis(self.0.wrapping_add(ms))
    }
}

impl From<u32> for Millis {
    fn from(ms: u32) -> Self {
        Millis(ms)
    }
}

/// Next-due deadline for a periodic job
///
/// Due-ness is decided by the sign of the wrapped difference, so deadlines
/// keep working across the counter wrap as long as the period stays well
/// under 2^31 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    period_ms: u32,
    next_due: Millis,
}

impl Interval {
    /// Create an interval that is due immediately at `start`
    pub const fn new(period_ms: u32, start: Millis) -> Self {
        Self {
            period_ms,
            next_due: start,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn next_due(&self) -> Millis {
        self.next_due
    }

    pub fn is_due(&self, now: Millis) -> bool {
        now.0.wrapping_sub(self.next_due.0) as i32 >= 0
    }

    /// Returns true (and re-arms) if the job should run at `now`
    pub fn poll(&mut self, now: Millis) -> bool {
        if self.is_due(now) {
            self.next_due = now.wrapping_add(self.period_ms);
            true
        } else {
            false
        }
    }

    /// Make the job due at `now` regardless of its schedule
    pub fn trigger(&mut self, now: Millis) {
        self.next_due = now;
    }
}

/// Counts whole time-periods for the status display
///
/// The period length is read on every update so the counter follows live
/// changes to the time-period setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodCounter {
    count: u32,
    last: Millis,
}

impl PeriodCounter {
    pub const fn new(start: Millis) -> Self {
        Self {
            count: 0,
            last: start,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Advance the counter if a full period has passed since the last step
    pub fn update(&mut self, now: Millis, period_ms: u32) -> u32 {
        if now.has_elapsed(self.last, period_ms.max(1)) {
            self.count = self.count.wrapping_add(1);
            self.last = now;
        }
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_across_wrap() {
        let before = Millis(u32::MAX - 99);
        let after = Millis(100);
        assert_eq!(after.elapsed_since(before), 200);
        assert!(after.has_elapsed(before, 200));
        assert!(!after.has_elapsed(before, 201));
    }

    #[test]
    fn test_interval_due_immediately() {
        let mut interval = Interval::new(100, Millis(5));
        assert!(interval.poll(Millis(5)));
        assert!(!interval.poll(Millis(104)));
        assert!(interval.poll(Millis(105)));
        assert_eq!(interval.next_due(), Millis(205));
    }

    #[test]
    fn test_interval_across_wrap() {
        let mut interval = Interval::new(10, Millis(u32::MAX - 4));
        assert!(interval.poll(Millis(u32::MAX - 4)));
        // Next due at 5 after wrapping
        assert!(!interval.is_due(Millis(u32::MAX)));
        assert!(!interval.is_due(Millis(4)));
        assert!(interval.is_due(Millis(5)));
    }

    #[test]
    fn test_interval_trigger() {
        let mut interval = Interval::new(100, Millis(0));
        assert!(interval.poll(Millis(0)));
        interval.trigger(Millis(30));
        assert!(interval.poll(Millis(30)));
        assert!(!interval.poll(Millis(31)));
    }

    #[test]
    fn test_period_counter_follows_period() {
        let mut counter = PeriodCounter::new(Millis(0));
        assert_eq!(counter.update(Millis(999), 1000), 0);
        assert_eq!(counter.update(Millis(1000), 1000), 1);
        // Period shortened on the fly
        assert_eq!(counter.update(Millis(1100), 100), 2);
        assert_eq!(counter.update(Millis(1150), 100), 2);
    }
}
