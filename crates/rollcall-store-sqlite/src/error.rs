//! Error type for `rollcall-store-sqlite`.

use chrono::NaiveDate;
use rollcall_core::store::StoreError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rollcall_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The (employee, date) uniqueness constraint rejected an insert.
  #[error("employee {employee_id} already has a record for {date}")]
  DuplicateRecord { employee_id: Uuid, date: NaiveDate },
}

impl StoreError for Error {
  fn into_domain(self) -> std::result::Result<rollcall_core::Error, Self> {
    match self {
      Error::Core(e) => Ok(e),
      Error::DuplicateRecord { employee_id, date } => {
        Ok(rollcall_core::Error::AlreadyCheckedIn { employee_id, date })
      }
      other => Err(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
