//! Error types for `rollcall-core`.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("employee not found: {0}")]
  EmployeeNotFound(Uuid),

  #[error("attendance record not found: {0}")]
  RecordNotFound(Uuid),

  #[error("employee {0} is not active")]
  EmployeeInactive(Uuid),

  #[error("employee {employee_id} already checked in on {date}")]
  AlreadyCheckedIn { employee_id: Uuid, date: NaiveDate },

  #[error("attendance record {0} is already checked out")]
  AlreadyCheckedOut(Uuid),

  #[error("attendance record {0} has no check-in time")]
  NotCheckedIn(Uuid),

  #[error("confidence {score} is below the required {threshold}")]
  LowConfidence { score: f64, threshold: f64 },

  #[error("confidence {0} is outside the range 0-100")]
  InvalidConfidence(f64),

  #[error("invalid {field}: {reason}")]
  Validation { field: &'static str, reason: String },

  #[error("unknown department: {0:?}")]
  UnknownDepartment(String),

  #[error("unknown employee status: {0:?}")]
  UnknownEmployeeStatus(String),

  #[error("unknown verification method: {0:?}")]
  UnknownVerificationMethod(String),

  #[error("unknown report range: {0:?}")]
  UnknownRange(String),
}

impl Error {
  pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Validation { field, reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
