//! CSV export of attendance records for Rollcall.
//!
//! Pure synchronous rendering plus a small helper that writes the report to
//! disk under its conventional file name.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::Local;
//! use rollcall_csv::to_csv;
//!
//! let csv = to_csv(&[], &Local);
//! assert_eq!(csv, "Date,Employee,Check In,Check Out,Status");
//! ```

pub mod error;
mod serialize;

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, TimeZone};
pub use error::{Error, Result};
use rollcall_core::record::AttendanceRecord;

/// MIME type to serve the export with.
pub const CONTENT_TYPE: &str = "text/csv";

/// Render `records` as CSV, in input order, with times shown in `tz`.
///
/// The header row is always present; an empty slice yields only the header.
/// There is no trailing newline.
pub fn to_csv<Tz: TimeZone>(records: &[AttendanceRecord], tz: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  serialize::serialize(records, tz)
}

/// `attendance-report-<YYYY-MM-DD>.csv`
pub fn export_file_name(date: NaiveDate) -> String {
  format!("attendance-report-{}.csv", date.format("%Y-%m-%d"))
}

/// Write the export for `date` into `dir`, returning the file's path.
pub fn write_report<Tz: TimeZone>(
  dir: &Path,
  date: NaiveDate,
  records: &[AttendanceRecord],
  tz: &Tz,
) -> Result<PathBuf>
where
  Tz::Offset: std::fmt::Display,
{
  let path = dir.join(export_file_name(date));
  std::fs::write(&path, to_csv(records, tz))
    .map_err(|source| Error::Write { path: path.clone(), source })?;
  tracing::info!(path = %path.display(), rows = records.len(), "wrote attendance report");
  Ok(path)
}

#[cfg(test)]
mod tests {
  use chrono::{FixedOffset, Utc};
  use rollcall_core::record::{AttendanceStatus, NewAttendanceRecord, VerificationMethod};
  use uuid::Uuid;

  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, day).unwrap() }

  fn record(name: &str, check_in: Option<(u32, u32)>, status: AttendanceStatus) -> AttendanceRecord {
    let date = d(2024, 3, 4);
    NewAttendanceRecord {
      employee_id: Uuid::new_v4(),
      employee_name: name.to_owned(),
      date,
      check_in_time: check_in
        .map(|(h, m)| date.and_hms_opt(h, m, 0).unwrap().and_utc()),
      check_out_time: None,
      status,
      verification_method: VerificationMethod::FacialRecognition,
      confidence_score: Some(98.5),
    }
    .into_record(Uuid::new_v4(), Utc::now())
  }

  #[test]
  fn empty_export_is_only_the_header() {
    assert_eq!(to_csv(&[], &Utc), "Date,Employee,Check In,Check Out,Status");
  }

  #[test]
  fn missing_times_render_as_dash() {
    let csv = to_csv(&[record("Ada Lovelace", None, AttendanceStatus::Absent)], &Utc);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines, ["Date,Employee,Check In,Check Out,Status", "2024-03-04,Ada Lovelace,-,-,absent"]);
  }

  #[test]
  fn times_are_formatted_in_the_given_zone() {
    let mut r = record("Grace Hopper", Some((7, 5)), AttendanceStatus::Late);
    r.check_out_time = Some(d(2024, 3, 4).and_hms_opt(16, 30, 0).unwrap().and_utc());

    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let csv = to_csv(&[r], &plus_two);
    assert!(csv.ends_with("\n2024-03-04,Grace Hopper,09:05,18:30,late"), "{csv}");
  }

  #[test]
  fn rows_keep_input_order_without_trailing_newline() {
    let records = [
      record("Zed", Some((8, 0)), AttendanceStatus::Present),
      record("Amy", Some((9, 15)), AttendanceStatus::Late),
    ];
    let csv = to_csv(&records, &Utc);
    let names: Vec<&str> = csv.lines().skip(1).map(|l| l.split(',').nth(1).unwrap()).collect();
    assert_eq!(names, ["Zed", "Amy"]);
    assert!(!csv.ends_with('\n'));
  }

  #[test]
  fn commas_in_values_are_not_escaped() {
    let csv = to_csv(&[record("Doe, Jane", None, AttendanceStatus::OnLeave)], &Utc);
    assert_eq!(csv.lines().nth(1), Some("2024-03-04,Doe, Jane,-,-,on_leave"));
  }

  #[test]
  fn unknown_status_is_written_verbatim() {
    let csv = to_csv(&[record("Ada", None, AttendanceStatus::from("remote"))], &Utc);
    assert!(csv.ends_with(",remote"));
  }

  #[test]
  fn file_name_uses_iso_date() {
    assert_eq!(export_file_name(d(2024, 1, 9)), "attendance-report-2024-01-09.csv");
  }

  #[test]
  fn write_report_creates_named_file() {
    let dir = std::env::temp_dir().join(format!("rollcall-csv-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();

    let path = write_report(&dir, d(2024, 3, 4), &[], &Utc).unwrap();
    assert_eq!(path.file_name().unwrap(), "attendance-report-2024-03-04.csv");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Date,Employee,Check In,Check Out,Status");

    std::fs::remove_dir_all(&dir).unwrap();
  }
}
