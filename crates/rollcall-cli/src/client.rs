//! Async HTTP client wrapping the Rollcall JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use rollcall_core::{
  aggregate::RangeReport,
  employee::Employee,
  interval::{DateInterval, ReportRange},
  record::AttendanceRecord,
  store::RecordQuery,
  view::{CheckInRequest, Dashboard},
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Connection settings for the Rollcall API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the Rollcall JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn expect_json<T: DeserializeOwned>(what: &str, resp: Response) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    let message = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|v| v["error"].as_str().map(str::to_owned))
      .unwrap_or_default();
    return Err(anyhow!("{what} → {status} {message}"));
  }
  resp.json().await.with_context(|| format!("deserialising {what}"))
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  // ── Employees ─────────────────────────────────────────────────────────────

  /// `GET /api/employees`
  pub async fn list_employees(&self) -> Result<Vec<Employee>> {
    let resp = self
      .client
      .get(self.url("/employees"))
      .send()
      .await
      .context("GET /employees failed")?;
    expect_json("GET /employees", resp).await
  }

  // ── Attendance ────────────────────────────────────────────────────────────

  /// `POST /api/attendance/check-in` with the simulated confidence.
  pub async fn check_in(&self, employee_id: Uuid) -> Result<AttendanceRecord> {
    let body = CheckInRequest { employee_id, confidence_score: None };
    let resp = self
      .client
      .post(self.url("/attendance/check-in"))
      .json(&body)
      .send()
      .await
      .context("POST /attendance/check-in failed")?;
    expect_json("POST /attendance/check-in", resp).await
  }

  /// `POST /api/attendance/{id}/check-out`
  pub async fn check_out(&self, record_id: Uuid) -> Result<AttendanceRecord> {
    let path = format!("/attendance/{record_id}/check-out");
    let resp = self
      .client
      .post(self.url(&path))
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    expect_json(&format!("POST {path}"), resp).await
  }

  /// `GET /api/attendance?from=&to=&limit=`
  pub async fn records_within(&self, interval: DateInterval) -> Result<Vec<AttendanceRecord>> {
    let resp = self
      .client
      .get(self.url("/attendance"))
      .query(&[
        ("from", interval.start.to_string()),
        ("to", interval.end.to_string()),
        ("limit", RecordQuery::REPORT_LIMIT.to_string()),
      ])
      .send()
      .await
      .context("GET /attendance failed")?;
    expect_json("GET /attendance", resp).await
  }

  // ── Screens ───────────────────────────────────────────────────────────────

  /// `GET /api/dashboard`
  pub async fn dashboard(&self) -> Result<Dashboard> {
    let resp = self
      .client
      .get(self.url("/dashboard"))
      .send()
      .await
      .context("GET /dashboard failed")?;
    expect_json("GET /dashboard", resp).await
  }

  /// `GET /api/reports?range=<preset>`
  pub async fn report(&self, range: ReportRange) -> Result<RangeReport> {
    let resp = self
      .client
      .get(self.url("/reports"))
      .query(&[("range", range.as_str())])
      .send()
      .await
      .context("GET /reports failed")?;
    expect_json("GET /reports", resp).await
  }
}
