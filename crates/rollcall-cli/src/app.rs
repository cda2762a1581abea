//! Application state machine and event dispatcher.

use std::sync::Arc;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use rollcall_core::{
  aggregate::RangeReport,
  employee::{Department, Employee},
  interval::ReportRange,
  record::AttendanceRecord,
  view::Dashboard,
};

use crate::client::ApiClient;

// ─── Tab ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
  Dashboard,
  Employees,
  Reports,
}

impl Tab {
  pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::Employees, Tab::Reports];

  pub fn title(self) -> &'static str {
    match self {
      Tab::Dashboard => "Dashboard",
      Tab::Employees => "Employees",
      Tab::Reports => "Reports",
    }
  }

  pub fn next(self) -> Self {
    match self {
      Tab::Dashboard => Tab::Employees,
      Tab::Employees => Tab::Reports,
      Tab::Reports => Tab::Dashboard,
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub tab: Tab,

  /// Today's overview; also the source of per-employee status.
  pub dashboard: Option<Dashboard>,

  /// Full roster, newest first.
  pub employees: Vec<Employee>,

  /// Current fuzzy-filter string (only edited when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* employee list.
  pub list_cursor: usize,

  pub range: ReportRange,

  pub report: Option<RangeReport>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      tab: Tab::Dashboard,
      dashboard: None,
      employees: Vec::new(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      range: ReportRange::default(),
      report: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the dashboard and roster.
  pub async fn load(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading…".into();
    self.dashboard = Some(self.client.dashboard().await?);
    self.employees = self.client.list_employees().await?;
    self.clamp_cursor();
    self.status_msg.clear();
    Ok(())
  }

  async fn load_report(&mut self) -> anyhow::Result<()> {
    self.report = Some(self.client.report(self.range).await?);
    Ok(())
  }

  /// Reload whatever the current tab shows, reporting failures in the status
  /// bar instead of aborting.
  async fn refresh(&mut self) {
    let result = match self.tab {
      Tab::Dashboard | Tab::Employees => self.load().await,
      Tab::Reports => self.load_report().await,
    };
    if let Err(e) = result {
      self.status_msg = format!("Error: {e}");
    }
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// Employees matching the current filter, best matches first.
  pub fn filtered_employees(&self) -> Vec<&Employee> {
    if self.filter.is_empty() {
      return self.employees.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &Employee)> = self
      .employees
      .iter()
      .filter_map(|e| {
        let haystack = format!(
          "{} {} {}",
          e.full_name,
          e.email.as_deref().unwrap_or_default(),
          Department::label(e.department)
        );
        matcher.fuzzy_match(&haystack, &self.filter).map(|score| (score, e))
      })
      .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, e)| e).collect()
  }

  /// The employee under the list cursor in the filtered view, if any.
  pub fn cursor_employee(&self) -> Option<&Employee> {
    self.filtered_employees().get(self.list_cursor).copied()
  }

  /// Today's record for `employee`, if they have checked in.
  pub fn today_record(&self, employee: &Employee) -> Option<&AttendanceRecord> {
    self
      .dashboard
      .as_ref()?
      .today
      .iter()
      .find(|r| r.employee_id == employee.id)
  }

  fn clamp_cursor(&mut self) {
    let len = self.filtered_employees().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Tab => self.switch_to(self.tab.next()).await,
      KeyCode::Char('1') => self.switch_to(Tab::Dashboard).await,
      KeyCode::Char('2') => self.switch_to(Tab::Employees).await,
      KeyCode::Char('3') => self.switch_to(Tab::Reports).await,
      KeyCode::F(5) => self.refresh().await,
      _ => match self.tab {
        Tab::Dashboard => {}
        Tab::Employees => self.handle_employees_key(key).await,
        Tab::Reports => self.handle_reports_key(key).await,
      },
    }
    Ok(true)
  }

  async fn switch_to(&mut self, tab: Tab) {
    self.tab = tab;
    if tab == Tab::Reports && self.report.is_some() {
      return;
    }
    self.refresh().await;
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
      }
      KeyCode::Enter => self.filter_active = false,
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => self.filter.push(c),
      _ => return,
    }
    self.list_cursor = 0;
  }

  async fn handle_employees_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_employees().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Char('c') => self.check_in_selected().await,
      KeyCode::Char('o') => self.check_out_selected().await,
      _ => {}
    }
  }

  async fn handle_reports_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('r') => {
        self.range = self.range.next();
        self.refresh().await;
      }
      KeyCode::Char('e') => self.export().await,
      _ => {}
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  async fn check_in_selected(&mut self) {
    let Some((id, name)) = self.cursor_employee().map(|e| (e.id, e.full_name.clone())) else {
      return;
    };
    self.status_msg = match self.client.check_in(id).await {
      Ok(record) => format!("{name} checked in ({})", record.status.label()),
      Err(e) => format!("Error: {e}"),
    };
    if let Err(e) = self.load().await {
      self.status_msg = format!("Error: {e}");
    }
  }

  async fn check_out_selected(&mut self) {
    let Some(employee) = self.cursor_employee() else {
      return;
    };
    let name = employee.full_name.clone();
    let Some(record_id) = self.today_record(employee).map(|r| r.id) else {
      self.status_msg = format!("{name} has not checked in today");
      return;
    };
    self.status_msg = match self.client.check_out(record_id).await {
      Ok(_) => format!("{name} checked out"),
      Err(e) => format!("Error: {e}"),
    };
    if let Err(e) = self.load().await {
      self.status_msg = format!("Error: {e}");
    }
  }

  /// Write the current range's records to the working directory.
  async fn export(&mut self) {
    let interval = self.range.interval(Local::now().date_naive());
    let result = async {
      let records = self.client.records_within(interval).await?;
      let dir = std::env::current_dir()?;
      let path = rollcall_csv::write_report(&dir, interval.end, &records, &Local)?;
      anyhow::Ok((path, records.len()))
    }
    .await;
    self.status_msg = match result {
      Ok((path, rows)) => format!("Exported {rows} records to {}", path.display()),
      Err(e) => format!("Export failed: {e}"),
    };
  }
}
