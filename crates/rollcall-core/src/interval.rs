//! Inclusive date intervals and the report-range presets that produce them.

use std::str::FromStr as _;

use chrono::{Datelike as _, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// An inclusive `[start, end]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
  pub start: NaiveDate,
  pub end:   NaiveDate,
}

impl DateInterval {
  pub fn new(start: NaiveDate, end: NaiveDate) -> Self { Self { start, end } }

  /// A single day.
  pub fn day(date: NaiveDate) -> Self { Self::new(date, date) }

  pub fn contains(&self, date: NaiveDate) -> bool { self.start <= date && date <= self.end }
}

/// The report ranges offered by the reports screen.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum ReportRange {
  #[default]
  #[serde(rename = "7days")]
  #[strum(serialize = "7days")]
  Last7Days,
  #[serde(rename = "30days")]
  #[strum(serialize = "30days")]
  Last30Days,
  #[serde(rename = "month")]
  #[strum(serialize = "month")]
  ThisMonth,
}

impl ReportRange {
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownRange(s.to_owned()))
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Last7Days => "Last 7 Days",
      Self::Last30Days => "Last 30 Days",
      Self::ThisMonth => "This Month",
    }
  }

  /// The next preset, wrapping around. Used to cycle through ranges.
  pub fn next(self) -> Self {
    match self {
      Self::Last7Days => Self::Last30Days,
      Self::Last30Days => Self::ThisMonth,
      Self::ThisMonth => Self::Last7Days,
    }
  }

  /// Resolve the preset into a concrete interval ending on `today`.
  ///
  /// "Last N days" reaches back N days, so it spans N + 1 calendar days.
  pub fn interval(self, today: NaiveDate) -> DateInterval {
    let start = match self {
      Self::Last7Days => days_before(today, 7),
      Self::Last30Days => days_before(today, 30),
      Self::ThisMonth => today.with_day(1).unwrap_or(today),
    };
    DateInterval::new(start, today)
  }
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
  date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, day).unwrap() }

  #[test]
  fn interval_bounds_are_inclusive() {
    let iv = DateInterval::new(d(2024, 1, 1), d(2024, 1, 3));
    assert!(iv.contains(d(2024, 1, 1)));
    assert!(iv.contains(d(2024, 1, 3)));
    assert!(!iv.contains(d(2023, 12, 31)));
    assert!(!iv.contains(d(2024, 1, 4)));
  }

  #[test]
  fn presets_resolve_relative_to_today() {
    let today = d(2024, 3, 15);
    assert_eq!(ReportRange::Last7Days.interval(today), DateInterval::new(d(2024, 3, 8), today));
    assert_eq!(ReportRange::Last30Days.interval(today), DateInterval::new(d(2024, 2, 14), today));
    assert_eq!(ReportRange::ThisMonth.interval(today), DateInterval::new(d(2024, 3, 1), today));
  }

  #[test]
  fn parse_accepts_wire_names_only() {
    assert_eq!(ReportRange::parse("7days").unwrap(), ReportRange::Last7Days);
    assert_eq!(ReportRange::parse("30days").unwrap(), ReportRange::Last30Days);
    assert_eq!(ReportRange::parse("month").unwrap(), ReportRange::ThisMonth);
    assert!(matches!(ReportRange::parse("year"), Err(Error::UnknownRange(_))));
    assert_eq!(ReportRange::default().as_str(), "7days");
  }

  #[test]
  fn next_cycles_through_all_presets() {
    let start = ReportRange::Last7Days;
    assert_eq!(start.next().next().next(), start);
  }
}
