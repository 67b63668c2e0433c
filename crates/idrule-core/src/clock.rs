//! Source of the current calendar date.
//!
//! Resident identity validation rejects birth dates later than "today". The
//! [`Clock`] trait keeps that the only point where validation touches the
//! outside world, so callers can pin the date for reproducible runs.
use chrono::{Local, NaiveDate};

/// Supplies the calendar date that birth dates are compared against.
pub trait Clock {
    /// Returns the current date.
    fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
