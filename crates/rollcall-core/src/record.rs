//! Attendance records, one per employee per day.

use std::{fmt, str::FromStr as _};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// The attendance status of a record.
///
/// Records arrive from storage that does not constrain the column, so any
/// string outside the four known values is kept verbatim in `Unknown` rather
/// than rejected. Aggregations count those separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
  Present,
  Late,
  Absent,
  OnLeave,
  Unknown(String),
}

impl AttendanceStatus {
  /// The four statuses reports break down by, in display order.
  pub const KNOWN: [Self; 4] = [Self::Present, Self::Late, Self::Absent, Self::OnLeave];

  pub fn as_str(&self) -> &str {
    match self {
      Self::Present => "present",
      Self::Late => "late",
      Self::Absent => "absent",
      Self::OnLeave => "on_leave",
      Self::Unknown(s) => s,
    }
  }

  /// Human-readable label, as shown in report breakdowns.
  pub fn label(&self) -> &str {
    match self {
      Self::Present => "Present",
      Self::Late => "Late",
      Self::Absent => "Absent",
      Self::OnLeave => "On Leave",
      Self::Unknown(s) => s,
    }
  }
}

impl From<&str> for AttendanceStatus {
  fn from(s: &str) -> Self {
    match s {
      "present" => Self::Present,
      "late" => Self::Late,
      "absent" => Self::Absent,
      "on_leave" => Self::OnLeave,
      other => Self::Unknown(other.to_owned()),
    }
  }
}

impl From<String> for AttendanceStatus {
  fn from(s: String) -> Self {
    match Self::from(s.as_str()) {
      Self::Unknown(_) => Self::Unknown(s),
      known => known,
    }
  }
}

impl From<AttendanceStatus> for String {
  fn from(status: AttendanceStatus) -> Self {
    match status {
      AttendanceStatus::Unknown(s) => s,
      known => known.as_str().to_owned(),
    }
  }
}

impl fmt::Display for AttendanceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ─── Verification ────────────────────────────────────────────────────────────

/// How the employee's identity was confirmed at check-in.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VerificationMethod {
  #[default]
  FacialRecognition,
  Manual,
}

impl VerificationMethod {
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownVerificationMethod(s.to_owned()))
  }
}

// ─── AttendanceRecord ────────────────────────────────────────────────────────

/// One employee's attendance for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
  pub id:                  Uuid,
  pub employee_id:         Uuid,
  /// Denormalised at check-in so reports survive later renames.
  pub employee_name:       String,
  pub date:                NaiveDate,
  pub check_in_time:       Option<DateTime<Utc>>,
  pub check_out_time:      Option<DateTime<Utc>>,
  pub status:              AttendanceStatus,
  pub verification_method: VerificationMethod,
  /// Recognition confidence, 0–100.
  pub confidence_score:    Option<f64>,
  /// Server-assigned timestamp; the `-created_date` sort key.
  pub created_at:          DateTime<Utc>,
}

// ─── NewAttendanceRecord ─────────────────────────────────────────────────────

/// Input to [`crate::store::AttendanceStore::record_attendance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttendanceRecord {
  pub employee_id:         Uuid,
  pub employee_name:       String,
  pub date:                NaiveDate,
  pub check_in_time:       Option<DateTime<Utc>>,
  pub check_out_time:      Option<DateTime<Utc>>,
  pub status:              AttendanceStatus,
  #[serde(default)]
  pub verification_method: VerificationMethod,
  pub confidence_score:    Option<f64>,
}

impl NewAttendanceRecord {
  pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> AttendanceRecord {
    AttendanceRecord {
      id,
      employee_id: self.employee_id,
      employee_name: self.employee_name,
      date: self.date,
      check_in_time: self.check_in_time,
      check_out_time: self.check_out_time,
      status: self.status,
      verification_method: self.verification_method,
      confidence_score: self.confidence_score,
      created_at,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_statuses_round_trip_through_strings() {
    for status in AttendanceStatus::KNOWN {
      let s: String = status.clone().into();
      assert_eq!(AttendanceStatus::from(s), status);
    }
  }

  #[test]
  fn unrecognised_status_is_preserved() {
    let status = AttendanceStatus::from("remote".to_owned());
    assert_eq!(status, AttendanceStatus::Unknown("remote".into()));
    assert_eq!(status.as_str(), "remote");

    let json = serde_json::to_string(&status).unwrap();
    assert_eq!(json, "\"remote\"");
  }

  #[test]
  fn status_serialises_as_snake_case_string() {
    assert_eq!(serde_json::to_string(&AttendanceStatus::OnLeave).unwrap(), "\"on_leave\"");
    let parsed: AttendanceStatus = serde_json::from_str("\"late\"").unwrap();
    assert_eq!(parsed, AttendanceStatus::Late);
  }

  #[test]
  fn verification_method_names() {
    assert_eq!(VerificationMethod::FacialRecognition.as_str(), "facial_recognition");
    assert_eq!(VerificationMethod::parse("manual").unwrap(), VerificationMethod::Manual);
    assert!(VerificationMethod::parse("retina").is_err());
  }
}
