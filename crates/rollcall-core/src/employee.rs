//! Employees: the roster that attendance records refer to.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Department ──────────────────────────────────────────────────────────────

/// The fixed set of departments an employee can belong to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum Department {
  Engineering,
  Design,
  Marketing,
  Sales,
  #[serde(rename = "HR")]
  #[strum(serialize = "HR")]
  Hr,
  Finance,
  Operations,
}

impl Department {
  /// Label used in reports for employees without a department.
  pub const FALLBACK_LABEL: &'static str = "Other";

  pub fn as_str(self) -> &'static str { self.into() }

  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownDepartment(s.to_owned()))
  }

  /// The report label for an optional department.
  pub fn label(department: Option<Self>) -> &'static str {
    department.map_or(Self::FALLBACK_LABEL, Self::as_str)
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Employment status. Only `Active` employees are expected to check in.
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
pub enum EmployeeStatus {
  #[default]
  Active,
  Inactive,
  OnLeave,
}

impl EmployeeStatus {
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownEmployeeStatus(s.to_owned()))
  }
}

// ─── Employee ────────────────────────────────────────────────────────────────

/// A member of the roster.
///
/// `employee_code` is the organisation's own identifier (e.g. `EMP-001`) and
/// travels as `employee_id` on the wire; `id` is the store-assigned UUID that
/// attendance records reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
  pub id:              Uuid,
  pub full_name:       String,
  pub email:           Option<String>,
  pub department:      Option<Department>,
  pub position:        Option<String>,
  #[serde(rename = "employee_id")]
  pub employee_code:   Option<String>,
  #[serde(default)]
  pub status:          EmployeeStatus,
  #[serde(default)]
  pub face_registered: bool,
  pub created_at:      DateTime<Utc>,
}

impl Employee {
  pub fn is_active(&self) -> bool { self.status == EmployeeStatus::Active }

  /// Case-insensitive substring match over name, email and department.
  /// An empty needle matches everyone.
  pub fn matches(&self, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
      return true;
    }
    let hit = |s: &str| s.to_lowercase().contains(&needle);
    hit(&self.full_name)
      || self.email.as_deref().is_some_and(hit)
      || self.department.is_some_and(|d| hit(d.as_str()))
  }

  /// Upper-cased initials of the full name, e.g. `"JD"` for `"John Doe"`.
  pub fn initials(&self) -> String {
    let initials: String = self
      .full_name
      .split_whitespace()
      .filter_map(|part| part.chars().next())
      .flat_map(char::to_uppercase)
      .collect();
    if initials.is_empty() { "??".to_owned() } else { initials }
  }
}

// ─── NewEmployee ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::AttendanceStore::add_employee`].
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEmployee {
  pub full_name:       String,
  pub email:           Option<String>,
  pub department:      Option<Department>,
  pub position:        Option<String>,
  #[serde(rename = "employee_id")]
  pub employee_code:   Option<String>,
  #[serde(default)]
  pub status:          EmployeeStatus,
  #[serde(default)]
  pub face_registered: bool,
}

impl NewEmployee {
  /// Convenience constructor for the three required fields.
  pub fn new(
    full_name: impl Into<String>,
    email: impl Into<String>,
    department: Department,
  ) -> Self {
    Self {
      full_name: full_name.into(),
      email: Some(email.into()),
      department: Some(department),
      ..Self::default()
    }
  }

  /// Name, email and department are required when creating or editing an
  /// employee.
  pub fn validate(&self) -> Result<()> {
    validate_required(&self.full_name, self.email.as_deref(), self.department)
  }

  pub fn into_employee(self, id: Uuid, created_at: DateTime<Utc>) -> Employee {
    Employee {
      id,
      full_name: self.full_name.trim().to_owned(),
      email: self.email.map(|e| e.trim().to_owned()),
      department: self.department,
      position: blank_to_none(self.position),
      employee_code: blank_to_none(self.employee_code),
      status: self.status,
      face_registered: self.face_registered,
      created_at,
    }
  }
}

// ─── EmployeePatch ───────────────────────────────────────────────────────────

/// A partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePatch {
  pub full_name:       Option<String>,
  pub email:           Option<String>,
  pub department:      Option<Department>,
  pub position:        Option<String>,
  #[serde(rename = "employee_id")]
  pub employee_code:   Option<String>,
  pub status:          Option<EmployeeStatus>,
  pub face_registered: Option<bool>,
}

impl EmployeePatch {
  /// Apply the patch to `employee` and re-check the required fields.
  pub fn apply(self, employee: &mut Employee) -> Result<()> {
    if let Some(name) = self.full_name {
      employee.full_name = name.trim().to_owned();
    }
    if let Some(email) = self.email {
      employee.email = Some(email.trim().to_owned());
    }
    if let Some(department) = self.department {
      employee.department = Some(department);
    }
    if let Some(position) = self.position {
      employee.position = blank_to_none(Some(position));
    }
    if let Some(code) = self.employee_code {
      employee.employee_code = blank_to_none(Some(code));
    }
    if let Some(status) = self.status {
      employee.status = status;
    }
    if let Some(face) = self.face_registered {
      employee.face_registered = face;
    }
    validate_required(
      &employee.full_name,
      employee.email.as_deref(),
      employee.department,
    )
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn validate_required(
  full_name: &str,
  email: Option<&str>,
  department: Option<Department>,
) -> Result<()> {
  if full_name.trim().is_empty() {
    return Err(Error::validation("full_name", "must not be empty"));
  }
  match email.map(str::trim) {
    None | Some("") => return Err(Error::validation("email", "must not be empty")),
    Some(e) if !e.contains('@') => {
      return Err(Error::validation("email", format!("{e:?} is not an email address")));
    }
    Some(_) => {}
  }
  if department.is_none() {
    return Err(Error::validation("department", "must be set"));
  }
  Ok(())
}

fn blank_to_none(s: Option<String>) -> Option<String> {
  s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn employee(name: &str, email: Option<&str>, dept: Option<Department>) -> Employee {
    Employee {
      id:              Uuid::new_v4(),
      full_name:       name.to_owned(),
      email:           email.map(str::to_owned),
      department:      dept,
      position:        None,
      employee_code:   None,
      status:          EmployeeStatus::Active,
      face_registered: false,
      created_at:      Utc::now(),
    }
  }

  #[test]
  fn department_strings_match_wire_names() {
    let names = [
      Department::Engineering,
      Department::Design,
      Department::Marketing,
      Department::Sales,
      Department::Hr,
      Department::Finance,
      Department::Operations,
    ]
    .map(Department::as_str);
    assert_eq!(
      names,
      ["Engineering", "Design", "Marketing", "Sales", "HR", "Finance", "Operations"]
    );
    assert_eq!(Department::parse("HR").unwrap(), Department::Hr);
    assert!(matches!(
      Department::parse("Legal"),
      Err(Error::UnknownDepartment(s)) if s == "Legal"
    ));
    assert_eq!(
      serde_json::to_string(&Department::Hr).unwrap(),
      "\"HR\""
    );
  }

  #[test]
  fn missing_department_labels_as_other() {
    assert_eq!(Department::label(None), "Other");
    assert_eq!(Department::label(Some(Department::Sales)), "Sales");
  }

  #[test]
  fn employee_status_snake_case() {
    assert_eq!(EmployeeStatus::OnLeave.as_str(), "on_leave");
    assert_eq!(EmployeeStatus::parse("inactive").unwrap(), EmployeeStatus::Inactive);
    assert!(EmployeeStatus::parse("retired").is_err());
  }

  #[test]
  fn search_is_case_insensitive_across_fields() {
    let e = employee("Ada Lovelace", Some("ada@example.com"), Some(Department::Engineering));
    assert!(e.matches("lovelace"));
    assert!(e.matches("EXAMPLE.COM"));
    assert!(e.matches("engin"));
    assert!(e.matches(""));
    assert!(!e.matches("design"));

    let bare = employee("Grace Hopper", None, None);
    assert!(!bare.matches("example"));
  }

  #[test]
  fn initials_fall_back_for_blank_names() {
    assert_eq!(employee("john ronald doe", None, None).initials(), "JRD");
    assert_eq!(employee("   ", None, None).initials(), "??");
  }

  #[test]
  fn new_employee_requires_name_email_department() {
    assert!(NewEmployee::new("Ada", "ada@example.com", Department::Design).validate().is_ok());

    let mut missing_name = NewEmployee::new(" ", "ada@example.com", Department::Design);
    assert!(matches!(
      missing_name.validate(),
      Err(Error::Validation { field: "full_name", .. })
    ));

    missing_name.full_name = "Ada".into();
    missing_name.email = Some("not-an-email".into());
    assert!(matches!(
      missing_name.validate(),
      Err(Error::Validation { field: "email", .. })
    ));

    missing_name.email = Some("ada@example.com".into());
    missing_name.department = None;
    assert!(matches!(
      missing_name.validate(),
      Err(Error::Validation { field: "department", .. })
    ));
  }

  #[test]
  fn new_employee_deserialises_external_code_as_employee_id() {
    let input: NewEmployee = serde_json::from_str(
      r#"{"full_name":"Ada","email":"ada@example.com","department":"HR","employee_id":"EMP-001"}"#,
    )
    .unwrap();
    assert_eq!(input.employee_code.as_deref(), Some("EMP-001"));
    assert_eq!(input.status, EmployeeStatus::Active);
    assert!(!input.face_registered);
  }

  #[test]
  fn patch_updates_only_given_fields_and_revalidates() {
    let mut e = employee("Ada", Some("ada@example.com"), Some(Department::Design));
    EmployeePatch {
      position: Some("Designer".into()),
      status: Some(EmployeeStatus::OnLeave),
      ..Default::default()
    }
    .apply(&mut e)
    .unwrap();
    assert_eq!(e.position.as_deref(), Some("Designer"));
    assert_eq!(e.status, EmployeeStatus::OnLeave);
    assert_eq!(e.full_name, "Ada");

    let err = EmployeePatch { full_name: Some(String::new()), ..Default::default() }
      .apply(&mut e)
      .unwrap_err();
    assert!(matches!(err, Error::Validation { field: "full_name", .. }));
  }

  #[test]
  fn blank_optional_fields_become_none() {
    let mut input = NewEmployee::new("Ada", "ada@example.com", Department::Sales);
    input.position = Some("  ".into());
    input.employee_code = Some("EMP-7".into());
    let e = input.into_employee(Uuid::new_v4(), Utc::now());
    assert_eq!(e.position, None);
    assert_eq!(e.employee_code.as_deref(), Some("EMP-7"));
  }
}
