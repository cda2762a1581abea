//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rollcall_core::{Error as CoreError, store::StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a store failure: domain rule violations keep their status code,
  /// everything else is a logged 500.
  pub fn store<E: StoreError>(e: E) -> Self {
    match e.into_domain() {
      Ok(domain) => domain.into(),
      Err(e) => {
        tracing::error!(error = %e, "store operation failed");
        Self::Store(Box::new(e))
      }
    }
  }
}

impl From<CoreError> for ApiError {
  fn from(e: CoreError) -> Self {
    let message = e.to_string();
    match e {
      CoreError::EmployeeNotFound(_) | CoreError::RecordNotFound(_) => Self::NotFound(message),
      CoreError::AlreadyCheckedIn { .. }
      | CoreError::AlreadyCheckedOut(_)
      | CoreError::NotCheckedIn(_) => Self::Conflict(message),
      CoreError::EmployeeInactive(_)
      | CoreError::LowConfidence { .. }
      | CoreError::InvalidConfidence(_) => Self::Unprocessable(message),
      CoreError::Validation { .. }
      | CoreError::UnknownDepartment(_)
      | CoreError::UnknownEmployeeStatus(_)
      | CoreError::UnknownVerificationMethod(_)
      | CoreError::UnknownRange(_) => Self::BadRequest(message),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
