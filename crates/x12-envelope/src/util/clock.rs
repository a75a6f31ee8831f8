//! Injectable time sources for envelope dates and times.
//!
//! Wrapping captures the current instant once per call. Passing the clock in
//! keeps the codec free of ambient state and lets tests pin exact output.

use chrono::{Local, NaiveDate, NaiveDateTime, Utc};

/// A source of the current wall-clock instant.
pub trait Clock: Send + Sync {
    /// Returns the current date and time.
    fn now(&self) -> NaiveDateTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// The UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    /// Creates a clock that always returns `at`.
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    /// Creates a clock from calendar fields, or `None` if they are invalid.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
