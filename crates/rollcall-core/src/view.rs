//! Request and response shapes shared by the HTTP API and its clients.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{aggregate::DailySummary, record::AttendanceRecord};

/// Body of `POST /attendance/check-in`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRequest {
  pub employee_id:      Uuid,
  /// Recognition confidence; the simulated score when omitted.
  #[serde(default)]
  pub confidence_score: Option<f64>,
}

/// Everything the dashboard screen shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
  pub date:         NaiveDate,
  pub company_name: String,
  pub summary:      DailySummary,
  /// Today's records, earliest check-in first.
  pub today:        Vec<AttendanceRecord>,
  /// Most recently created records across all days.
  pub recent:       Vec<AttendanceRecord>,
}
