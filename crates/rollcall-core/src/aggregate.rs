//! Summaries over already-fetched rosters and record sets.
//!
//! Both aggregators are pure: they never read the clock or touch storage.
//! Callers pass the roster and the records they want summarised.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  employee::{Department, Employee},
  interval::DateInterval,
  record::{AttendanceRecord, AttendanceStatus},
};

// ─── Daily ───────────────────────────────────────────────────────────────────

/// Headline numbers for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
  pub total_active: usize,
  /// Number of records for the day.
  pub checked_in:   usize,
  pub present:      usize,
  pub late:         usize,
  /// `total_active - present - late`, floored at zero.
  pub absent:       usize,
  /// Active employees with no record for the day.
  pub pending:      usize,
}

/// Summarise one day.
///
/// `roster` may contain inactive employees; only active ones are counted.
/// `records` should already be restricted to the day in question.
pub fn aggregate_day(roster: &[Employee], records: &[AttendanceRecord]) -> DailySummary {
  let total_active = roster.iter().filter(|e| e.is_active()).count();

  let mut present = 0;
  let mut late = 0;
  for record in records {
    match record.status {
      AttendanceStatus::Present => present += 1,
      AttendanceStatus::Late => late += 1,
      _ => {}
    }
  }

  let with_record: HashSet<Uuid> = records.iter().map(|r| r.employee_id).collect();

  DailySummary {
    total_active,
    checked_in: records.len(),
    present,
    late,
    absent: total_active.saturating_sub(present + late),
    pending: total_active.saturating_sub(with_record.len()),
  }
}

// ─── Range ───────────────────────────────────────────────────────────────────

/// Records per status. Statuses outside the known four land in `unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
  pub present:  usize,
  pub late:     usize,
  pub absent:   usize,
  pub on_leave: usize,
  pub unknown:  usize,
}

impl StatusCounts {
  pub fn get(&self, status: &AttendanceStatus) -> usize {
    match status {
      AttendanceStatus::Present => self.present,
      AttendanceStatus::Late => self.late,
      AttendanceStatus::Absent => self.absent,
      AttendanceStatus::OnLeave => self.on_leave,
      AttendanceStatus::Unknown(_) => self.unknown,
    }
  }

  fn bump(&mut self, status: &AttendanceStatus) {
    match status {
      AttendanceStatus::Present => self.present += 1,
      AttendanceStatus::Late => self.late += 1,
      AttendanceStatus::Absent => self.absent += 1,
      AttendanceStatus::OnLeave => self.on_leave += 1,
      AttendanceStatus::Unknown(_) => self.unknown += 1,
    }
  }
}

/// Present / late counts for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTally {
  pub department: String,
  pub present:    usize,
  pub late:       usize,
}

/// One row of the status breakdown panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusShare {
  pub status:  AttendanceStatus,
  pub label:   String,
  pub count:   usize,
  /// Whole percent of all records in the range.
  pub percent: u32,
}

/// Everything the reports screen shows for a date interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeReport {
  pub interval:         DateInterval,
  pub total_records:    usize,
  pub active_employees: usize,
  pub counts:           StatusCounts,
  /// Percentage of records that are `present`, one decimal place.
  pub attendance_rate:  f64,
  pub by_department:    Vec<DepartmentTally>,
  pub breakdown:        Vec<StatusShare>,
}

/// Summarise every record whose date falls inside `interval`.
pub fn aggregate_range(
  employees: &[Employee],
  records: &[AttendanceRecord],
  interval: DateInterval,
) -> RangeReport {
  let in_range: Vec<&AttendanceRecord> =
    records.iter().filter(|r| interval.contains(r.date)).collect();
  let total_records = in_range.len();

  let mut counts = StatusCounts::default();
  for record in &in_range {
    if let AttendanceStatus::Unknown(raw) = &record.status {
      tracing::warn!(record = %record.id, status = %raw, "unrecognised attendance status");
    }
    counts.bump(&record.status);
  }

  let breakdown = AttendanceStatus::KNOWN
    .into_iter()
    .map(|status| {
      let count = counts.get(&status);
      StatusShare {
        label: status.label().to_owned(),
        percent: percent_of(count, total_records).round() as u32,
        status,
        count,
      }
    })
    .collect();

  RangeReport {
    interval,
    total_records,
    active_employees: employees.iter().filter(|e| e.is_active()).count(),
    attendance_rate: (percent_of(counts.present, total_records) * 10.0).round() / 10.0,
    by_department: tally_departments(employees, &in_range),
    counts,
    breakdown,
  }
}

fn percent_of(part: usize, whole: usize) -> f64 {
  if whole == 0 {
    return 0.0;
  }
  part as f64 / whole as f64 * 100.0
}

fn tally_departments(employees: &[Employee], records: &[&AttendanceRecord]) -> Vec<DepartmentTally> {
  let mut tallies: Vec<DepartmentTally> = Vec::new();
  let mut slot_of: HashMap<&'static str, usize> = HashMap::new();
  let mut department_of: HashMap<Uuid, usize> = HashMap::with_capacity(employees.len());

  for employee in employees {
    let label = Department::label(employee.department);
    let slot = *slot_of.entry(label).or_insert_with(|| {
      tallies.push(DepartmentTally { department: label.to_owned(), present: 0, late: 0 });
      tallies.len() - 1
    });
    department_of.insert(employee.id, slot);
  }

  for record in records {
    let Some(&slot) = department_of.get(&record.employee_id) else {
      continue;
    };
    match record.status {
      AttendanceStatus::Present => tallies[slot].present += 1,
      AttendanceStatus::Late => tallies[slot].late += 1,
      _ => {}
    }
  }

  tallies
}
