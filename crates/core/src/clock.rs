//! Calendar capability.
//!
//! The store stamps `last_restocked` from an injected clock instead of reading the
//! system time directly, so tests can pin the date.

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Current calendar date in the operator's local time zone.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date (tests, replays).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
