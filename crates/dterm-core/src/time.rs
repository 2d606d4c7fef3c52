//! Injected wall-clock access.
//!
//! Widgets that display time never read the system clock directly; they hold
//! an `Arc<dyn Clock>` so tests can freeze time with [`FixedClock`].

use chrono::{Local, NaiveDateTime};

/// Source of the current local time.
pub trait Clock: std::fmt::Debug + Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Minutes to add to local time to reach UTC (west of UTC is positive).
    fn timezone_offset_minutes(&self) -> i32;
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timezone_offset_minutes(&self) -> i32 {
        -(Local::now().offset().local_minus_utc() / 60)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: NaiveDateTime,
    offset_minutes: i32,
}

impl FixedClock {
    /// Freeze time at `at` with the given UTC offset (see [`Clock::timezone_offset_minutes`]).
    #[must_use]
    pub const fn new(at: NaiveDateTime, offset_minutes: i32) -> Self {
        Self { at, offset_minutes }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }

    fn timezone_offset_minutes(&self) -> i32 {
        self.offset_minutes
    }
}
