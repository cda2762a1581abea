//! The single source of "now" for anything that needs the current day.

use chrono::{DateTime, FixedOffset, Local, NaiveDate};

/// Supplies the current local instant.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<FixedOffset>;

  fn today(&self) -> NaiveDate { self.now().date_naive() }
}

/// Reads the system clock in the machine's local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<FixedOffset> { Local::now().fixed_offset() }
}

/// Always returns the same instant. Used by tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<FixedOffset> { self.0 }
}
