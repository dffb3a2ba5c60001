//! Time sources for message stamps.
//!
//! Header and load-time stamps are read from a [`Clock`] handed to the
//! generator at construction, so tests can pin time with [`FixedClock`].

use crate::messages::Time;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current time
    fn now(&self) -> Time;
}

/// Wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Time {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(Time::from_duration)
            .unwrap_or_default()
    }
}

/// Clock that always reports the same instant
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedClock(pub Time);

impl FixedClock {
    /// Clock pinned to `millis` since epoch
    pub fn from_millis(millis: u64) -> Self {
        Self(Time::from_millis(millis))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Time {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::from_millis(42_000);
        assert_eq!(clock.now(), Time::new(42, 0));
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now().sec > 1_577_836_800);
    }
}
