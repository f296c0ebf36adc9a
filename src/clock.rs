//! Clock abstraction for default exercise dates
//!
//! Exercises logged without an explicit date fall back to "today". Time is
//! injected as a capability so tests can pin it.

use chrono::{NaiveDate, Utc};

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    /// Today's date (UTC)
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock that always returns the same date, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
