//! Handlers for `/reports` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reports` | `?range=7days\|30days\|month`, default `7days` |
//! | `GET`  | `/reports/export` | Same params; `text/csv` attachment |

use axum::{
  Json,
  extract::{Query, State},
  http::header,
  response::IntoResponse,
};
use rollcall_core::{
  aggregate::{RangeReport, aggregate_range},
  interval::{DateInterval, ReportRange},
  record::AttendanceRecord,
  store::{AttendanceStore, EmployeeQuery, RecordQuery},
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
  pub range: Option<String>,
}

impl RangeParams {
  fn range(&self) -> Result<ReportRange, ApiError> {
    Ok(self.range.as_deref().map(ReportRange::parse).transpose()?.unwrap_or_default())
  }
}

/// Fetch the records inside `range`'s interval, capped at the report limit.
async fn records_for<S: AttendanceStore>(
  state: &ApiState<S>,
  range: ReportRange,
) -> Result<(DateInterval, Vec<AttendanceRecord>), ApiError> {
  let interval = range.interval(state.clock.today());
  let records = state
    .store
    .list_records(RecordQuery::within(interval))
    .await
    .map_err(ApiError::store)?;
  Ok((interval, records))
}

/// `GET /reports[?range=<preset>]`
pub async fn handler<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<RangeParams>,
) -> Result<Json<RangeReport>, ApiError> {
  let range = params.range()?;
  let (interval, records) = records_for(&state, range).await?;
  let employees = state
    .store
    .list_employees(EmployeeQuery::default())
    .await
    .map_err(ApiError::store)?;

  tracing::debug!(range = %range, records = records.len(), "building report");
  Ok(Json(aggregate_range(&employees, &records, interval)))
}

/// `GET /reports/export[?range=<preset>]`
pub async fn export<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
  let range = params.range()?;
  let (_, records) = records_for(&state, range).await?;

  let now = state.clock.now();
  let csv = rollcall_csv::to_csv(&records, now.offset());
  let disposition = format!(
    "attachment; filename={}",
    rollcall_csv::export_file_name(now.date_naive())
  );

  Ok((
    [
      (header::CONTENT_TYPE, rollcall_csv::CONTENT_TYPE.to_owned()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    csv,
  ))
}
