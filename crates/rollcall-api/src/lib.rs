//! JSON REST API for Rollcall.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rollcall_core::store::AttendanceStore`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rollcall_api::api_router(store.clone(), Arc::new(SystemClock)))
//! ```

pub mod attendance;
pub mod dashboard;
pub mod employees;
pub mod error;
pub mod reports;
pub mod settings;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use rollcall_core::{clock::Clock, store::AttendanceStore};

pub use error::ApiError;

/// Shared handler state: the store plus the clock that defines "today".
pub struct ApiState<S> {
  pub store: Arc<S>,
  pub clock: Arc<dyn Clock>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), clock: Arc::clone(&self.clock) }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Router<()>
where
  S: AttendanceStore + 'static,
{
  Router::new()
    // Employees
    .route("/employees", get(employees::list::<S>).post(employees::create::<S>))
    .route(
      "/employees/{id}",
      get(employees::get_one::<S>)
        .put(employees::update::<S>)
        .delete(employees::delete::<S>),
    )
    // Attendance
    .route("/attendance", get(attendance::list::<S>))
    .route("/attendance/check-in", post(attendance::check_in::<S>))
    .route("/attendance/{id}/check-out", post(attendance::check_out::<S>))
    // Screens
    .route("/dashboard", get(dashboard::handler::<S>))
    .route("/reports", get(reports::handler::<S>))
    .route("/reports/export", get(reports::export::<S>))
    .route("/settings", get(settings::get::<S>).put(settings::put::<S>))
    .with_state(ApiState { store, clock })
}
