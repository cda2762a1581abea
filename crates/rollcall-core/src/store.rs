//! The `AttendanceStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `rollcall-store-sqlite`).
//! Higher layers (`rollcall-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  employee::{Department, Employee, EmployeePatch, EmployeeStatus, NewEmployee},
  interval::DateInterval,
  record::{AttendanceRecord, NewAttendanceRecord},
  settings::Settings,
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`AttendanceStore::list_employees`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
  pub status:     Option<EmployeeStatus>,
  pub department: Option<Department>,
  /// Case-insensitive match over name, email and department.
  pub search:     Option<String>,
}

impl EmployeeQuery {
  pub fn active() -> Self {
    Self { status: Some(EmployeeStatus::Active), ..Self::default() }
  }
}

/// Sort keys for record listings. Both sort newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordSort {
  #[default]
  #[serde(rename = "-date")]
  Date,
  #[serde(rename = "-created_date")]
  CreatedDate,
}

/// Parameters for [`AttendanceStore::list_records`].
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
  /// Inclusive lower date bound.
  pub from:        Option<NaiveDate>,
  /// Inclusive upper date bound.
  pub to:          Option<NaiveDate>,
  pub employee_id: Option<Uuid>,
  pub sort:        RecordSort,
  pub limit:       Option<usize>,
}

impl RecordQuery {
  /// Cap on records fetched for a report.
  pub const REPORT_LIMIT: usize = 500;
  /// Cap on the dashboard's recent-activity list.
  pub const RECENT_LIMIT: usize = 50;

  pub fn within(interval: DateInterval) -> Self {
    Self {
      from: Some(interval.start),
      to: Some(interval.end),
      limit: Some(Self::REPORT_LIMIT),
      ..Self::default()
    }
  }

  pub fn recent() -> Self {
    Self {
      sort: RecordSort::CreatedDate,
      limit: Some(Self::RECENT_LIMIT),
      ..Self::default()
    }
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Backend error that may stand for a domain rule the storage layer enforced,
/// such as the one-record-per-day constraint.
pub trait StoreError: std::error::Error + Send + Sync + Sized + 'static {
  /// Recover the domain error, or hand back `self` for infrastructure
  /// failures.
  fn into_domain(self) -> Result<crate::Error, Self>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Rollcall storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait AttendanceStore: Send + Sync {
  type Error: StoreError;

  // ── Employees ─────────────────────────────────────────────────────────

  /// Persist a new employee. `id` and `created_at` are assigned here.
  fn add_employee(
    &self,
    input: NewEmployee,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  fn get_employee(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Newest employees first.
  fn list_employees(
    &self,
    query: EmployeeQuery,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  /// Apply `patch`; `None` if the employee does not exist.
  fn update_employee(
    &self,
    id: Uuid,
    patch: EmployeePatch,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Returns `false` if there was nothing to delete. Attendance records are
  /// kept; they carry the employee's name.
  fn delete_employee(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Attendance records ────────────────────────────────────────────────

  /// Persist a record. Fails if the employee already has one for that date.
  fn record_attendance(
    &self,
    input: NewAttendanceRecord,
  ) -> impl Future<Output = Result<AttendanceRecord, Self::Error>> + Send + '_;

  fn get_record(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<AttendanceRecord>, Self::Error>> + Send + '_;

  /// Every record for `date`, oldest check-in first.
  fn records_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<AttendanceRecord>, Self::Error>> + Send + '_;

  fn list_records(
    &self,
    query: RecordQuery,
  ) -> impl Future<Output = Result<Vec<AttendanceRecord>, Self::Error>> + Send + '_;

  /// Set the check-out time; `None` if the record does not exist.
  fn check_out(
    &self,
    record_id: Uuid,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<AttendanceRecord>, Self::Error>> + Send + '_;

  // ── Settings ──────────────────────────────────────────────────────────

  /// Stored settings, or the defaults if none were ever saved.
  fn get_settings(&self) -> impl Future<Output = Result<Settings, Self::Error>> + Send + '_;

  fn put_settings(
    &self,
    settings: Settings,
  ) -> impl Future<Output = Result<Settings, Self::Error>> + Send + '_;
}
