//! [`SqliteStore`]: the SQLite implementation of [`AttendanceStore`].

use std::path::Path;

use chrono::{DateTime, NaiveDate, SubsecRound as _, Utc};
use rollcall_core::{
  employee::{Employee, EmployeePatch, NewEmployee},
  record::{AttendanceRecord, NewAttendanceRecord},
  settings::Settings,
  store::{AttendanceStore, EmployeeQuery, RecordQuery, RecordSort},
};
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    EMPLOYEE_COLUMNS, RECORD_COLUMNS, RawEmployee, RawRecord, encode_date, encode_dt,
    encode_uuid,
  },
  schema::SCHEMA,
};

/// Stored timestamps keep microseconds; values handed back to callers are
/// truncated the same way so they compare equal after a round trip.
fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rollcall store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened attendance store");
    Ok(store)
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Overwrite the mutable columns of `employee`'s row. Returns the number of
  /// rows changed, 0 when the row is gone.
  pub(crate) async fn write_employee(&self, employee: &Employee) -> Result<usize> {
    let id = encode_uuid(employee.id);
    let full_name = employee.full_name.clone();
    let email = employee.email.clone();
    let department = employee.department.map(|d| d.as_str());
    let position = employee.position.clone();
    let code = employee.employee_code.clone();
    let status = employee.status.as_str();
    let face = employee.face_registered;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE employees
              SET full_name = ?2, email = ?3, department = ?4, position = ?5,
                  employee_code = ?6, status = ?7, face_registered = ?8
            WHERE id = ?1",
          rusqlite::params![id, full_name, email, department, position, code, status, face],
        )?)
      })
      .await?;
    Ok(changed)
  }
}

// ─── AttendanceStore impl ────────────────────────────────────────────────────

impl AttendanceStore for SqliteStore {
  type Error = Error;

  // ── Employees ─────────────────────────────────────────────────────────────

  async fn add_employee(&self, input: NewEmployee) -> Result<Employee> {
    input.validate()?;
    let employee = input.into_employee(Uuid::new_v4(), now());

    let id = encode_uuid(employee.id);
    let full_name = employee.full_name.clone();
    let email = employee.email.clone();
    let department = employee.department.map(|d| d.as_str());
    let position = employee.position.clone();
    let code = employee.employee_code.clone();
    let status = employee.status.as_str();
    let face = employee.face_registered;
    let created_at = encode_dt(employee.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO employees (
             id, full_name, email, department, position, employee_code,
             status, face_registered, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id, full_name, email, department, position, code, status, face, created_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(employee = %employee.id, "added employee");
    Ok(employee)
  }

  async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
              rusqlite::params![id_str],
              RawEmployee::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn list_employees(&self, query: EmployeeQuery) -> Result<Vec<Employee>> {
    let status = query.status.map(|s| s.as_str());
    let department = query.department.map(|d| d.as_str());

    let raws: Vec<RawEmployee> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EMPLOYEE_COLUMNS} FROM employees
            WHERE (?1 IS NULL OR status = ?1)
              AND (?2 IS NULL OR department = ?2)
            ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![status, department], RawEmployee::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut employees: Vec<Employee> =
      raws.into_iter().map(RawEmployee::into_employee).collect::<Result<_>>()?;

    if let Some(needle) = query.search.as_deref() {
      employees.retain(|e| e.matches(needle));
    }
    Ok(employees)
  }

  async fn update_employee(&self, id: Uuid, patch: EmployeePatch) -> Result<Option<Employee>> {
    let Some(mut employee) = self.get_employee(id).await? else {
      return Ok(None);
    };
    patch.apply(&mut employee)?;
    if self.write_employee(&employee).await? == 0 {
      // Deleted after the read.
      return Ok(None);
    }
    Ok(Some(employee))
  }

  async fn delete_employee(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let deleted = self
      .conn
      .call(move |conn| Ok(conn.execute("DELETE FROM employees WHERE id = ?1", [id_str])?))
      .await?;
    Ok(deleted > 0)
  }

  // ── Attendance records ────────────────────────────────────────────────────

  async fn record_attendance(&self, input: NewAttendanceRecord) -> Result<AttendanceRecord> {
    let mut record = input.into_record(Uuid::new_v4(), now());
    record.check_in_time = record.check_in_time.map(|t| t.trunc_subsecs(6));
    record.check_out_time = record.check_out_time.map(|t| t.trunc_subsecs(6));

    let id = encode_uuid(record.id);
    let employee_id = encode_uuid(record.employee_id);
    let employee_name = record.employee_name.clone();
    let date = encode_date(record.date);
    let check_in = record.check_in_time.map(encode_dt);
    let check_out = record.check_out_time.map(encode_dt);
    let status = record.status.to_string();
    let method = record.verification_method.as_str();
    let confidence = record.confidence_score;
    let created_at = encode_dt(record.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO attendance_records (
             id, employee_id, employee_name, date, check_in_time, check_out_time,
             status, verification_method, confidence_score, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id,
            employee_id,
            employee_name,
            date,
            check_in,
            check_out,
            status,
            method,
            confidence,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await;

    match inserted {
      Ok(()) => {}
      Err(e) if is_unique_violation(&e) => {
        return Err(Error::DuplicateRecord {
          employee_id: record.employee_id,
          date:        record.date,
        });
      }
      Err(e) => return Err(e.into()),
    }

    tracing::debug!(record = %record.id, employee = %record.employee_id, "recorded attendance");
    Ok(record)
  }

  async fn get_record(&self, id: Uuid) -> Result<Option<AttendanceRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {RECORD_COLUMNS} FROM attendance_records WHERE id = ?1"),
              rusqlite::params![id_str],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn records_on(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
    let date_str = encode_date(date);

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECORD_COLUMNS} FROM attendance_records
            WHERE date = ?1
            ORDER BY check_in_time, created_at"
        ))?;
        let rows = stmt
          .query_map([date_str], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn list_records(&self, query: RecordQuery) -> Result<Vec<AttendanceRecord>> {
    let mut conds: Vec<&'static str> = vec![];
    let mut params: Vec<Value> = vec![];

    if let Some(from) = query.from {
      conds.push("date >= ?");
      params.push(Value::Text(encode_date(from)));
    }
    if let Some(to) = query.to {
      conds.push("date <= ?");
      params.push(Value::Text(encode_date(to)));
    }
    if let Some(employee_id) = query.employee_id {
      conds.push("employee_id = ?");
      params.push(Value::Text(encode_uuid(employee_id)));
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };
    let order = match query.sort {
      RecordSort::Date => "date DESC, created_at DESC",
      RecordSort::CreatedDate => "created_at DESC, rowid DESC",
    };
    // SQLite treats a negative limit as "no limit".
    let limit = query.limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    params.push(Value::Integer(limit));

    let sql = format!(
      "SELECT {RECORD_COLUMNS} FROM attendance_records {where_clause} ORDER BY {order} LIMIT ?"
    );

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn check_out(&self, record_id: Uuid, at: DateTime<Utc>) -> Result<Option<AttendanceRecord>> {
    let id_str = encode_uuid(record_id);
    let at_str = encode_dt(at.trunc_subsecs(6));

    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE attendance_records SET check_out_time = ?2 WHERE id = ?1",
          rusqlite::params![id_str, at_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Ok(None);
    }
    self.get_record(record_id).await
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  async fn get_settings(&self) -> Result<Settings> {
    let json: Option<String> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row("SELECT value_json FROM settings WHERE id = 1", [], |r| r.get(0))
            .optional()?,
        )
      })
      .await?;

    match json {
      Some(json) => Ok(serde_json::from_str(&json)?),
      None => Ok(Settings::default()),
    }
  }

  async fn put_settings(&self, settings: Settings) -> Result<Settings> {
    settings.validate()?;
    let json = serde_json::to_string(&settings)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO settings (id, value_json) VALUES (1, ?1)
           ON CONFLICT(id) DO UPDATE SET value_json = excluded.value_json",
          [json],
        )?;
        Ok(())
      })
      .await?;

    tracing::info!(company = %settings.company_name, "settings updated");
    Ok(settings)
  }
}
