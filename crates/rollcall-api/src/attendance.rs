//! Handlers for `/attendance` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/attendance` | `?date=` or `?from=&to=`, `?employee_id=`, `?sort=-date\|-created_date`, `?limit=` |
//! | `POST` | `/attendance/check-in` | Body: [`CheckInRequest`]; 201, 404, 409 or 422 |
//! | `POST` | `/attendance/{id}/check-out` | 404 or 409 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use rollcall_core::{
  checkin::{SIMULATED_CONFIDENCE, plan_check_in, plan_check_out},
  record::AttendanceRecord,
  store::{AttendanceStore, RecordQuery, RecordSort},
  view::CheckInRequest,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub date:        Option<NaiveDate>,
  pub from:        Option<NaiveDate>,
  pub to:          Option<NaiveDate>,
  pub employee_id: Option<Uuid>,
  pub sort:        Option<RecordSort>,
  pub limit:       Option<usize>,
}

impl ListParams {
  /// Resolve the inclusive `(from, to)` bounds; either side may be open.
  fn bounds(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), ApiError> {
    match (self.date, self.from, self.to) {
      (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ApiError::BadRequest(
        "`date` cannot be combined with `from`/`to`".into(),
      )),
      (Some(day), None, None) => Ok((Some(day), Some(day))),
      (None, Some(from), Some(to)) if from > to => {
        Err(ApiError::BadRequest("`from` must not be after `to`".into()))
      }
      (None, from, to) => Ok((from, to)),
    }
  }
}

/// `GET /attendance`
pub async fn list<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<AttendanceRecord>>, ApiError> {
  let (from, to) = params.bounds()?;
  let query = RecordQuery {
    from,
    to,
    employee_id: params.employee_id,
    sort:        params.sort.unwrap_or_default(),
    limit:       params.limit,
  };
  let records = state.store.list_records(query).await.map_err(ApiError::store)?;
  Ok(Json(records))
}

// ─── Check in ─────────────────────────────────────────────────────────────────

/// `POST /attendance/check-in`
pub async fn check_in<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<CheckInRequest>,
) -> Result<impl IntoResponse, ApiError> {
  let employee = state
    .store
    .get_employee(body.employee_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("employee {} not found", body.employee_id)))?;

  let settings = state.store.get_settings().await.map_err(ApiError::store)?;
  let now = state.clock.now();
  let today = state.store.records_on(now.date_naive()).await.map_err(ApiError::store)?;

  let planned = plan_check_in(
    &employee,
    &today,
    &now,
    &settings,
    body.confidence_score.unwrap_or(SIMULATED_CONFIDENCE),
  )?;
  let record = state.store.record_attendance(planned).await.map_err(ApiError::store)?;

  tracing::info!(
    employee = %employee.id,
    name = %employee.full_name,
    status = %record.status,
    "checked in"
  );
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Check out ────────────────────────────────────────────────────────────────

/// `POST /attendance/{id}/check-out`
pub async fn check_out<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<AttendanceRecord>, ApiError> {
  let not_found = || ApiError::NotFound(format!("attendance record {id} not found"));

  let record = state
    .store
    .get_record(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  let at = plan_check_out(&record, state.clock.now().to_utc())?;

  let record = state
    .store
    .check_out(id, at)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  tracing::info!(record = %id, employee = %record.employee_id, "checked out");
  Ok(Json(record))
}
