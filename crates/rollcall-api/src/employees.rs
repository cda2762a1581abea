//! Handlers for `/employees` endpoints.
//!
//! | Method   | Path              | Notes |
//! |----------|-------------------|-------|
//! | `GET`    | `/employees`      | Optional `?status=&department=&search=` |
//! | `POST`   | `/employees`      | Body: [`NewEmployee`]; 201 |
//! | `GET`    | `/employees/{id}` | 404 if not found |
//! | `PUT`    | `/employees/{id}` | Body: [`EmployeePatch`]; 404 if not found |
//! | `DELETE` | `/employees/{id}` | 204; 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use rollcall_core::{
  employee::{Employee, EmployeePatch, NewEmployee},
  store::{AttendanceStore, EmployeeQuery},
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

fn not_found(id: Uuid) -> ApiError { ApiError::NotFound(format!("employee {id} not found")) }

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /employees[?status=<status>][&department=<dept>][&search=<text>]`
pub async fn list<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Query(query): Query<EmployeeQuery>,
) -> Result<Json<Vec<Employee>>, ApiError> {
  let employees = state.store.list_employees(query).await.map_err(ApiError::store)?;
  Ok(Json(employees))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /employees`
pub async fn create<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let employee = state.store.add_employee(body).await.map_err(ApiError::store)?;
  tracing::info!(employee = %employee.id, name = %employee.full_name, "employee created");
  Ok((StatusCode::CREATED, Json(employee)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /employees/{id}`
pub async fn get_one<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Employee>, ApiError> {
  let employee = state
    .store
    .get_employee(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(employee))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /employees/{id}`. Fields left out of the body are unchanged.
pub async fn update<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<EmployeePatch>,
) -> Result<Json<Employee>, ApiError> {
  let mut preview = state
    .store
    .get_employee(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  // Surface validation failures as 400 before the store sees the patch.
  patch.clone().apply(&mut preview)?;

  let employee = state
    .store
    .update_employee(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(employee))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /employees/{id}`
pub async fn delete<S: AttendanceStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  if !state.store.delete_employee(id).await.map_err(ApiError::store)? {
    return Err(not_found(id));
  }
  tracing::info!(employee = %id, "employee deleted");
  Ok(StatusCode::NO_CONTENT)
}
