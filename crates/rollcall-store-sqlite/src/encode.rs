//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed microsecond width
//! so that lexical order matches chronological order. Dates are `YYYY-MM-DD`.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rollcall_core::{
  employee::{Department, Employee, EmployeeStatus},
  record::{AttendanceRecord, AttendanceStatus, VerificationMethod},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const EMPLOYEE_COLUMNS: &str = "id, full_name, email, department, position, employee_code, \
                                    status, face_registered, created_at";

/// Raw values read directly from an `employees` row.
pub struct RawEmployee {
  pub id:              String,
  pub full_name:       String,
  pub email:           Option<String>,
  pub department:      Option<String>,
  pub position:        Option<String>,
  pub employee_code:   Option<String>,
  pub status:          String,
  pub face_registered: bool,
  pub created_at:      String,
}

impl RawEmployee {
  /// Map a row selected with [`EMPLOYEE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      full_name:       row.get(1)?,
      email:           row.get(2)?,
      department:      row.get(3)?,
      position:        row.get(4)?,
      employee_code:   row.get(5)?,
      status:          row.get(6)?,
      face_registered: row.get(7)?,
      created_at:      row.get(8)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      id:              decode_uuid(&self.id)?,
      full_name:       self.full_name,
      email:           self.email,
      department:      self.department.as_deref().map(Department::parse).transpose()?,
      position:        self.position,
      employee_code:   self.employee_code,
      status:          EmployeeStatus::parse(&self.status)?,
      face_registered: self.face_registered,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

pub const RECORD_COLUMNS: &str = "id, employee_id, employee_name, date, check_in_time, \
                                  check_out_time, status, verification_method, \
                                  confidence_score, created_at";

/// Raw values read directly from an `attendance_records` row.
pub struct RawRecord {
  pub id:                  String,
  pub employee_id:         String,
  pub employee_name:       String,
  pub date:                String,
  pub check_in_time:       Option<String>,
  pub check_out_time:      Option<String>,
  pub status:              String,
  pub verification_method: String,
  pub confidence_score:    Option<f64>,
  pub created_at:          String,
}

impl RawRecord {
  /// Map a row selected with [`RECORD_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      employee_id:         row.get(1)?,
      employee_name:       row.get(2)?,
      date:                row.get(3)?,
      check_in_time:       row.get(4)?,
      check_out_time:      row.get(5)?,
      status:              row.get(6)?,
      verification_method: row.get(7)?,
      confidence_score:    row.get(8)?,
      created_at:          row.get(9)?,
    })
  }

  pub fn into_record(self) -> Result<AttendanceRecord> {
    Ok(AttendanceRecord {
      id:                  decode_uuid(&self.id)?,
      employee_id:         decode_uuid(&self.employee_id)?,
      employee_name:       self.employee_name,
      date:                decode_date(&self.date)?,
      check_in_time:       decode_opt_dt(self.check_in_time)?,
      check_out_time:      decode_opt_dt(self.check_out_time)?,
      status:              AttendanceStatus::from(self.status),
      verification_method: VerificationMethod::parse(&self.verification_method)?,
      confidence_score:    self.confidence_score,
      created_at:          decode_dt(&self.created_at)?,
    })
  }
}
