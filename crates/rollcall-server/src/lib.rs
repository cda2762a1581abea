//! HTTP server wiring for Rollcall.
//!
//! Loads [`ServerConfig`], and mounts the [`rollcall_api`] router under
//! `/api` behind a request trace layer.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use rollcall_core::{clock::Clock, store::AttendanceStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Prefix for configuration environment variables, e.g. `ROLLCALL_PORT`.
pub const ENV_PREFIX: &str = "ROLLCALL";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_owned(),
      port:       8080,
      store_path: PathBuf::from("rollcall.db"),
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and then `ROLLCALL_*` environment variables,
  /// later sources overriding earlier ones.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level router: the JSON API under `/api`, traced.
pub fn router<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Router
where
  S: AttendanceStore + 'static,
{
  Router::new()
    .nest("/api", rollcall_api::api_router(store, clock))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use rollcall_core::clock::SystemClock;
  use rollcall_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(Arc::new(store), Arc::new(SystemClock))
  }

  async fn get(uri: &str) -> StatusCode {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app().await.oneshot(req).await.unwrap().status()
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    assert_eq!(get("/api/settings").await, StatusCode::OK);
    assert_eq!(get("/api/dashboard").await, StatusCode::OK);
    assert_eq!(get("/settings").await, StatusCode::NOT_FOUND);
  }

  #[test]
  fn missing_config_file_yields_defaults() {
    let path = std::env::temp_dir().join(format!("rollcall-missing-{}.toml", Uuid::new_v4()));
    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.host, ServerConfig::default().host);
    assert_eq!(cfg.store_path, PathBuf::from("rollcall.db"));
  }

  #[test]
  fn config_file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!("rollcall-{}.toml", Uuid::new_v4()));
    std::fs::write(&path, "port = 9191\nstore_path = \"~/attendance.db\"\n").unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 9191);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.address(), "127.0.0.1:9191");

    std::fs::remove_file(&path).unwrap();
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/a.db")), PathBuf::from(home).join("a.db"));
    assert_eq!(expand_tilde(Path::new("/tmp/a.db")), PathBuf::from("/tmp/a.db"));
  }
}
