//! Row rendering for the attendance report.
//!
//! Fields are joined with `,` and rows with `\n`. Nothing is quoted, so a
//! value containing a comma shifts the columns of its row.

use chrono::{DateTime, TimeZone, Utc};
use rollcall_core::record::AttendanceRecord;

pub(crate) const HEADER: [&str; 5] = ["Date", "Employee", "Check In", "Check Out", "Status"];

/// Shown in place of a missing time.
pub(crate) const PLACEHOLDER: &str = "-";

const TIME_FORMAT: &str = "%H:%M";

pub(crate) fn serialize<Tz: TimeZone>(records: &[AttendanceRecord], tz: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  let mut lines = Vec::with_capacity(records.len() + 1);
  lines.push(HEADER.join(","));
  lines.extend(records.iter().map(|r| row(r, tz)));
  lines.join("\n")
}

fn row<Tz: TimeZone>(record: &AttendanceRecord, tz: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  [
    record.date.format("%Y-%m-%d").to_string(),
    record.employee_name.clone(),
    clock_time(record.check_in_time, tz),
    clock_time(record.check_out_time, tz),
    record.status.to_string(),
  ]
  .join(",")
}

fn clock_time<Tz: TimeZone>(at: Option<DateTime<Utc>>, tz: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  at.map_or_else(
    || PLACEHOLDER.to_owned(),
    |t| t.with_timezone(tz).format(TIME_FORMAT).to_string(),
  )
}
