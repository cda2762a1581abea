//! Organisation-wide settings edited from the settings panel.

use chrono::{NaiveTime, Timelike as _};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, policy::LatePolicy};

/// Settings persisted by the store. Missing fields deserialise to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub company_name:              String,
  /// Display label only; timestamps are always classified in server-local
  /// time.
  pub timezone:                  String,
  #[serde(with = "hh_mm")]
  pub work_start_time:           NaiveTime,
  #[serde(with = "hh_mm")]
  pub work_end_time:             NaiveTime,
  pub late_threshold_minutes:    u32,
  pub email_notifications:       bool,
  pub slack_notifications:       bool,
  pub auto_checkout:             bool,
  /// Minimum recognition confidence (0–100) accepted at check-in.
  pub face_confidence_threshold: f64,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      company_name:              "Acme Corporation".to_owned(),
      timezone:                  "UTC".to_owned(),
      work_start_time:           NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
      work_end_time:             NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
      late_threshold_minutes:    15,
      email_notifications:       true,
      slack_notifications:       false,
      auto_checkout:             true,
      face_confidence_threshold: 85.0,
    }
  }
}

impl Settings {
  /// The late policy implied by the configured work-start hour.
  pub fn late_policy(&self) -> LatePolicy { LatePolicy::new(self.work_start_time.hour()) }

  pub fn validate(&self) -> Result<()> {
    if self.company_name.trim().is_empty() {
      return Err(Error::validation("company_name", "must not be empty"));
    }
    if self.work_start_time >= self.work_end_time {
      return Err(Error::validation("work_end_time", "must be after work_start_time"));
    }
    if !(0.0..=100.0).contains(&self.face_confidence_threshold) {
      return Err(Error::validation("face_confidence_threshold", "must be between 0 and 100"));
    }
    Ok(())
  }
}

/// `"HH:MM"` (de)serialisation for times of day.
mod hh_mm {
  use chrono::NaiveTime;
  use serde::{Deserialize as _, Deserializer, Serializer, de::Error as _};

  const FORMAT: &str = "%H:%M";

  pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&t.format(FORMAT))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(d)?;
    NaiveTime::parse_from_str(&raw, FORMAT)
      .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
      .map_err(D::Error::custom)
  }
}
