//! Late-arrival policy: derives `present` / `late` from a check-in instant.

use chrono::{DateTime, TimeZone, Timelike as _};
use serde::{Deserialize, Serialize};

use crate::record::AttendanceStatus;

/// Classifies check-ins against a work-start hour.
///
/// The comparison uses the hour component of the instant *in whatever zone it
/// is expressed in*; callers pass local time. The boundary hour itself is
/// late: with the default threshold a 09:00 check-in is `late`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatePolicy {
  pub threshold_hour: u32,
}

impl LatePolicy {
  pub const DEFAULT_THRESHOLD_HOUR: u32 = 9;

  pub fn new(threshold_hour: u32) -> Self { Self { threshold_hour } }

  pub fn classify<Tz: TimeZone>(&self, check_in: &DateTime<Tz>) -> AttendanceStatus {
    if check_in.hour() >= self.threshold_hour {
      AttendanceStatus::Late
    } else {
      AttendanceStatus::Present
    }
  }
}

impl Default for LatePolicy {
  fn default() -> Self { Self::new(Self::DEFAULT_THRESHOLD_HOUR) }
}
