//! Handlers for `/settings`.

use axum::{Json, extract::State};
use rollcall_core::{settings::Settings, store::AttendanceStore};

use crate::{ApiState, error::ApiError};

/// `GET /settings`
pub async fn get<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Settings>, ApiError> {
  let settings = state.store.get_settings().await.map_err(ApiError::store)?;
  Ok(Json(settings))
}

/// `PUT /settings` replaces the stored settings. Omitted fields reset to
/// their defaults.
pub async fn put<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Json(settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError> {
  settings.validate()?;
  let saved = state.store.put_settings(settings).await.map_err(ApiError::store)?;
  Ok(Json(saved))
}
