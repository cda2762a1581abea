//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, NaiveTime, TimeZone as _, Utc};
use rollcall_core::{
  employee::{Department, EmployeePatch, EmployeeStatus, NewEmployee},
  interval::DateInterval,
  record::{AttendanceStatus, NewAttendanceRecord, VerificationMethod},
  settings::Settings,
  store::{AttendanceStore, EmployeeQuery, RecordQuery, RecordSort, StoreError as _},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, day).unwrap() }

fn new_record(employee_id: Uuid, date: NaiveDate, status: AttendanceStatus) -> NewAttendanceRecord {
  NewAttendanceRecord {
    employee_id,
    employee_name: "Ada Lovelace".into(),
    date,
    check_in_time: Some(date.and_hms_opt(8, 30, 0).unwrap().and_utc()),
    check_out_time: None,
    status,
    verification_method: VerificationMethod::FacialRecognition,
    confidence_score: Some(98.5),
  }
}

// ─── Employees ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_employee() {
  let s = store().await;

  let mut input = NewEmployee::new("Ada Lovelace", "ada@example.com", Department::Engineering);
  input.employee_code = Some("EMP-001".into());
  input.position = Some("Analyst".into());
  let added = s.add_employee(input).await.unwrap();

  let fetched = s.get_employee(added.id).await.unwrap().expect("employee exists");
  assert_eq!(fetched, added);
  assert_eq!(fetched.department, Some(Department::Engineering));
  assert_eq!(fetched.employee_code.as_deref(), Some("EMP-001"));
  assert_eq!(fetched.status, EmployeeStatus::Active);
}

#[tokio::test]
async fn get_employee_missing_returns_none() {
  let s = store().await;
  assert!(s.get_employee(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn add_employee_rejects_invalid_input() {
  let s = store().await;
  let err = s
    .add_employee(NewEmployee::new("", "ada@example.com", Department::Hr))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(rollcall_core::Error::Validation { field: "full_name", .. })));
}

#[tokio::test]
async fn list_employees_newest_first_with_filters() {
  let s = store().await;
  let ada = s
    .add_employee(NewEmployee::new("Ada Lovelace", "ada@example.com", Department::Engineering))
    .await
    .unwrap();
  let grace = s
    .add_employee(NewEmployee::new("Grace Hopper", "grace@navy.mil", Department::Engineering))
    .await
    .unwrap();
  let mut leave = NewEmployee::new("Alan Turing", "alan@example.com", Department::Finance);
  leave.status = EmployeeStatus::OnLeave;
  let alan = s.add_employee(leave).await.unwrap();

  let all = s.list_employees(EmployeeQuery::default()).await.unwrap();
  let ids: Vec<Uuid> = all.iter().map(|e| e.id).collect();
  assert_eq!(ids, [alan.id, grace.id, ada.id]);

  let active = s.list_employees(EmployeeQuery::active()).await.unwrap();
  assert_eq!(active.len(), 2);

  let finance = s
    .list_employees(EmployeeQuery { department: Some(Department::Finance), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(finance.len(), 1);
  assert_eq!(finance[0].id, alan.id);

  let search = s
    .list_employees(EmployeeQuery { search: Some("EXAMPLE.com".into()), ..Default::default() })
    .await
    .unwrap();
  let mut found: Vec<Uuid> = search.iter().map(|e| e.id).collect();
  found.sort();
  let mut expected = vec![ada.id, alan.id];
  expected.sort();
  assert_eq!(found, expected);
}

#[tokio::test]
async fn update_employee_patches_fields() {
  let s = store().await;
  let e = s
    .add_employee(NewEmployee::new("Ada", "ada@example.com", Department::Design))
    .await
    .unwrap();

  let updated = s
    .update_employee(e.id, EmployeePatch {
      full_name: Some("Ada Lovelace".into()),
      face_registered: Some(true),
      ..Default::default()
    })
    .await
    .unwrap()
    .expect("employee exists");
  assert_eq!(updated.full_name, "Ada Lovelace");
  assert!(updated.face_registered);

  let fetched = s.get_employee(e.id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);

  let missing = s.update_employee(Uuid::new_v4(), EmployeePatch::default()).await.unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn write_to_deleted_employee_changes_nothing() {
  let s = store().await;
  let e = s
    .add_employee(NewEmployee::new("Ada", "ada@example.com", Department::Design))
    .await
    .unwrap();
  assert_eq!(s.write_employee(&e).await.unwrap(), 1);

  assert!(s.delete_employee(e.id).await.unwrap());
  assert_eq!(s.write_employee(&e).await.unwrap(), 0);
  let patch = EmployeePatch { full_name: Some("Ada Lovelace".into()), ..Default::default() };
  assert!(s.update_employee(e.id, patch).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_employee_keeps_records() {
  let s = store().await;
  let e = s
    .add_employee(NewEmployee::new("Ada", "ada@example.com", Department::Sales))
    .await
    .unwrap();
  let record = s
    .record_attendance(new_record(e.id, d(2024, 1, 2), AttendanceStatus::Present))
    .await
    .unwrap();

  assert!(s.delete_employee(e.id).await.unwrap());
  assert!(!s.delete_employee(e.id).await.unwrap());
  assert!(s.get_employee(e.id).await.unwrap().is_none());
  assert!(s.get_record(record.id).await.unwrap().is_some());
}

// ─── Attendance records ──────────────────────────────────────────────────────

#[tokio::test]
async fn record_and_get_attendance() {
  let s = store().await;
  let employee_id = Uuid::new_v4();
  let record = s
    .record_attendance(new_record(employee_id, d(2024, 1, 2), AttendanceStatus::Late))
    .await
    .unwrap();

  let fetched = s.get_record(record.id).await.unwrap().expect("record exists");
  assert_eq!(fetched, record);
  assert_eq!(fetched.status, AttendanceStatus::Late);
  assert_eq!(fetched.confidence_score, Some(98.5));
}

#[tokio::test]
async fn second_record_same_day_is_duplicate() {
  let s = store().await;
  let employee_id = Uuid::new_v4();
  let day = d(2024, 1, 2);
  s.record_attendance(new_record(employee_id, day, AttendanceStatus::Present))
    .await
    .unwrap();

  let err = s
    .record_attendance(new_record(employee_id, day, AttendanceStatus::Late))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateRecord { date, .. } if date == day));
  assert!(matches!(
    err.into_domain(),
    Ok(rollcall_core::Error::AlreadyCheckedIn { employee_id: id, .. }) if id == employee_id
  ));

  // A different day is fine.
  s.record_attendance(new_record(employee_id, d(2024, 1, 3), AttendanceStatus::Present))
    .await
    .unwrap();
}

#[tokio::test]
async fn unknown_status_survives_round_trip() {
  let s = store().await;
  let record = s
    .record_attendance(new_record(Uuid::new_v4(), d(2024, 1, 2), AttendanceStatus::from("remote")))
    .await
    .unwrap();
  let fetched = s.get_record(record.id).await.unwrap().unwrap();
  assert_eq!(fetched.status, AttendanceStatus::Unknown("remote".into()));
}

#[tokio::test]
async fn records_on_returns_only_that_day() {
  let s = store().await;
  let day = d(2024, 3, 4);
  for _ in 0..3 {
    s.record_attendance(new_record(Uuid::new_v4(), day, AttendanceStatus::Present))
      .await
      .unwrap();
  }
  s.record_attendance(new_record(Uuid::new_v4(), d(2024, 3, 5), AttendanceStatus::Present))
    .await
    .unwrap();

  let records = s.records_on(day).await.unwrap();
  assert_eq!(records.len(), 3);
  assert!(records.iter().all(|r| r.date == day));
}

#[tokio::test]
async fn list_records_filters_sorts_and_limits() {
  let s = store().await;
  let ada = Uuid::new_v4();
  let grace = Uuid::new_v4();
  for day in 1..=5 {
    s.record_attendance(new_record(ada, d(2024, 1, day), AttendanceStatus::Present))
      .await
      .unwrap();
  }
  s.record_attendance(new_record(grace, d(2024, 1, 3), AttendanceStatus::Late))
    .await
    .unwrap();

  let in_range = s
    .list_records(RecordQuery::within(DateInterval::new(d(2024, 1, 2), d(2024, 1, 4))))
    .await
    .unwrap();
  assert_eq!(in_range.len(), 4);
  assert!(in_range.windows(2).all(|w| w[0].date >= w[1].date));

  let for_ada = s
    .list_records(RecordQuery { employee_id: Some(ada), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(for_ada.len(), 5);
  assert_eq!(for_ada[0].date, d(2024, 1, 5));

  let limited = s
    .list_records(RecordQuery { limit: Some(2), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(limited.len(), 2);

  let recent = s
    .list_records(RecordQuery { sort: RecordSort::CreatedDate, ..RecordQuery::recent() })
    .await
    .unwrap();
  assert_eq!(recent.len(), 6);
  assert_eq!(recent[0].employee_id, grace);
}

#[tokio::test]
async fn list_records_with_open_bounds() {
  let s = store().await;
  let ada = Uuid::new_v4();
  for day in 1..=5 {
    s.record_attendance(new_record(ada, d(2024, 3, day), AttendanceStatus::Present))
      .await
      .unwrap();
  }

  let from_only = s
    .list_records(RecordQuery { from: Some(d(2024, 3, 4)), ..Default::default() })
    .await
    .unwrap();
  let dates: Vec<NaiveDate> = from_only.iter().map(|r| r.date).collect();
  assert_eq!(dates, [d(2024, 3, 5), d(2024, 3, 4)]);

  let to_only = s
    .list_records(RecordQuery { to: Some(d(2024, 3, 2)), ..Default::default() })
    .await
    .unwrap();
  let dates: Vec<NaiveDate> = to_only.iter().map(|r| r.date).collect();
  assert_eq!(dates, [d(2024, 3, 2), d(2024, 3, 1)]);
}

#[tokio::test]
async fn check_out_sets_time() {
  let s = store().await;
  let record = s
    .record_attendance(new_record(Uuid::new_v4(), d(2024, 1, 2), AttendanceStatus::Present))
    .await
    .unwrap();
  let at = Utc.with_ymd_and_hms(2024, 1, 2, 17, 45, 0).unwrap();

  let updated = s.check_out(record.id, at).await.unwrap().expect("record exists");
  assert_eq!(updated.check_out_time, Some(at));
  assert_eq!(updated.check_in_time, record.check_in_time);

  assert!(s.check_out(Uuid::new_v4(), at).await.unwrap().is_none());
}

// ─── Settings ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn settings_default_until_saved() {
  let s = store().await;
  assert_eq!(s.get_settings().await.unwrap(), Settings::default());

  let custom = Settings {
    company_name: "Initech".into(),
    work_start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    face_confidence_threshold: 90.0,
    ..Settings::default()
  };
  s.put_settings(custom.clone()).await.unwrap();
  assert_eq!(s.get_settings().await.unwrap(), custom);

  let again = Settings { slack_notifications: true, ..custom };
  s.put_settings(again.clone()).await.unwrap();
  assert_eq!(s.get_settings().await.unwrap(), again);
}

#[tokio::test]
async fn put_settings_rejects_invalid() {
  let s = store().await;
  let bad = Settings { face_confidence_threshold: 150.0, ..Settings::default() };
  assert!(matches!(s.put_settings(bad).await, Err(Error::Core(_))));
  assert_eq!(s.get_settings().await.unwrap(), Settings::default());
}
