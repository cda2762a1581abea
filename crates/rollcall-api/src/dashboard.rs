//! Handler for `GET /dashboard`.

use axum::{Json, extract::State};
use rollcall_core::{
  aggregate::aggregate_day,
  store::{AttendanceStore, EmployeeQuery, RecordQuery},
  view::Dashboard,
};

use crate::{ApiState, error::ApiError};

/// `GET /dashboard`: today's summary, today's records and recent activity.
pub async fn handler<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Dashboard>, ApiError> {
  let date = state.clock.today();

  let roster = state
    .store
    .list_employees(EmployeeQuery::active())
    .await
    .map_err(ApiError::store)?;
  let today = state.store.records_on(date).await.map_err(ApiError::store)?;
  let recent = state
    .store
    .list_records(RecordQuery::recent())
    .await
    .map_err(ApiError::store)?;
  let settings = state.store.get_settings().await.map_err(ApiError::store)?;

  Ok(Json(Dashboard {
    date,
    company_name: settings.company_name,
    summary: aggregate_day(&roster, &today),
    today,
    recent,
  }))
}
