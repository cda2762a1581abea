//! Check-in and check-out rules.
//!
//! These functions decide whether an attendance change is allowed and build
//! the record to persist. Storage happens elsewhere.

use chrono::{DateTime, TimeZone, Utc};

use crate::{
  Error, Result,
  employee::Employee,
  record::{AttendanceRecord, NewAttendanceRecord, VerificationMethod},
  settings::Settings,
};

/// Confidence reported by the simulated recognition step.
pub const SIMULATED_CONFIDENCE: f64 = 98.5;

/// Build today's record for `employee` checking in at `now`.
///
/// `now` must be in the local zone: its calendar date becomes the record
/// date and its hour decides `present` versus `late`. `today_records` are the
/// records already stored for that date.
pub fn plan_check_in<Tz: TimeZone>(
  employee: &Employee,
  today_records: &[AttendanceRecord],
  now: &DateTime<Tz>,
  settings: &Settings,
  confidence: f64,
) -> Result<NewAttendanceRecord> {
  if !employee.is_active() {
    return Err(Error::EmployeeInactive(employee.id));
  }

  let date = now.date_naive();
  if today_records.iter().any(|r| r.employee_id == employee.id && r.date == date) {
    return Err(Error::AlreadyCheckedIn { employee_id: employee.id, date });
  }

  if !(0.0..=100.0).contains(&confidence) {
    return Err(Error::InvalidConfidence(confidence));
  }
  if confidence < settings.face_confidence_threshold {
    return Err(Error::LowConfidence {
      score:     confidence,
      threshold: settings.face_confidence_threshold,
    });
  }

  let status = settings.late_policy().classify(now);
  tracing::debug!(employee = %employee.id, %date, %status, "planned check-in");

  Ok(NewAttendanceRecord {
    employee_id: employee.id,
    employee_name: employee.full_name.clone(),
    date,
    check_in_time: Some(now.to_utc()),
    check_out_time: None,
    status,
    verification_method: VerificationMethod::FacialRecognition,
    confidence_score: Some(confidence),
  })
}

/// Check that `record` can be checked out at `at`.
pub fn plan_check_out(record: &AttendanceRecord, at: DateTime<Utc>) -> Result<DateTime<Utc>> {
  if record.check_out_time.is_some() {
    return Err(Error::AlreadyCheckedOut(record.id));
  }
  let Some(check_in) = record.check_in_time else {
    return Err(Error::NotCheckedIn(record.id));
  };
  if at < check_in {
    return Err(Error::validation("check_out_time", "must not precede check-in"));
  }
  Ok(at)
}

#[cfg(test)]
mod tests {
  use chrono::{FixedOffset, NaiveDate, NaiveTime};
  use uuid::Uuid;

  use super::*;
  use crate::{
    employee::{Department, EmployeeStatus, NewEmployee},
    record::AttendanceStatus,
  };

  fn ada() -> Employee {
    NewEmployee::new("Ada Lovelace", "ada@example.com", Department::Engineering)
      .into_employee(Uuid::new_v4(), Utc::now())
  }

  fn local(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
      .unwrap()
      .with_ymd_and_hms(2024, 6, 3, hour, minute, 0)
      .unwrap()
  }

  #[test]
  fn early_check_in_is_present() {
    let e = ada();
    let now = local(8, 45);
    let planned =
      plan_check_in(&e, &[], &now, &Settings::default(), SIMULATED_CONFIDENCE).unwrap();

    assert_eq!(planned.employee_id, e.id);
    assert_eq!(planned.employee_name, "Ada Lovelace");
    assert_eq!(planned.date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    assert_eq!(planned.status, AttendanceStatus::Present);
    assert_eq!(planned.check_in_time, Some(now.to_utc()));
    assert_eq!(planned.verification_method, VerificationMethod::FacialRecognition);
    assert_eq!(planned.confidence_score, Some(98.5));
  }

  #[test]
  fn work_start_hour_sets_the_late_threshold() {
    let e = ada();
    let settings = Settings {
      work_start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
      ..Settings::default()
    };
    let planned = plan_check_in(&e, &[], &local(8, 0), &settings, 99.0).unwrap();
    assert_eq!(planned.status, AttendanceStatus::Late);
  }

  #[test]
  fn second_check_in_same_day_is_rejected() {
    let e = ada();
    let now = local(9, 30);
    let first = plan_check_in(&e, &[], &now, &Settings::default(), 99.0)
      .unwrap()
      .into_record(Uuid::new_v4(), Utc::now());

    let err = plan_check_in(&e, &[first], &local(17, 0), &Settings::default(), 99.0).unwrap_err();
    assert!(matches!(err, Error::AlreadyCheckedIn { employee_id, .. } if employee_id == e.id));
  }

  #[test]
  fn inactive_and_low_confidence_are_rejected() {
    let mut e = ada();
    e.status = EmployeeStatus::OnLeave;
    assert!(matches!(
      plan_check_in(&e, &[], &local(8, 0), &Settings::default(), 99.0),
      Err(Error::EmployeeInactive(_))
    ));

    e.status = EmployeeStatus::Active;
    assert!(matches!(
      plan_check_in(&e, &[], &local(8, 0), &Settings::default(), 60.0),
      Err(Error::LowConfidence { threshold, .. }) if threshold == 85.0
    ));
    assert!(matches!(
      plan_check_in(&e, &[], &local(8, 0), &Settings::default(), 101.0),
      Err(Error::InvalidConfidence(_))
    ));
  }

  #[test]
  fn check_out_once_after_check_in() {
    let e = ada();
    let now = local(8, 0);
    let mut record = plan_check_in(&e, &[], &now, &Settings::default(), 99.0)
      .unwrap()
      .into_record(Uuid::new_v4(), Utc::now());

    let later = local(17, 30).to_utc();
    assert_eq!(plan_check_out(&record, later).unwrap(), later);
    assert!(plan_check_out(&record, local(7, 0).to_utc()).is_err());

    record.check_out_time = Some(later);
    assert!(matches!(plan_check_out(&record, later), Err(Error::AlreadyCheckedOut(_))));

    record.check_out_time = None;
    record.check_in_time = None;
    assert!(matches!(plan_check_out(&record, later), Err(Error::NotCheckedIn(_))));
  }
}
