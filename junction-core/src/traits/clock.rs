//! Millisecond clock source

use crate::clock::Millis;

/// Free-running millisecond counter
///
/// The value wraps at `u32::MAX`; consumers compare timestamps with
/// wrapping arithmetic only.
pub trait Clock {
    fn now(&self) -> Millis;
}
