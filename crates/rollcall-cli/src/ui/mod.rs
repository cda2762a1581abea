//! TUI rendering: header with tabs, the active tab's body, status bar.

pub mod dashboard;
pub mod employees;
pub mod reports;

use chrono::{DateTime, Local, Utc};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use rollcall_core::record::AttendanceStatus;

use crate::app::{App, Tab};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  match app.tab {
    Tab::Dashboard => dashboard::draw(f, rows[1], app),
    Tab::Employees => employees::draw(f, rows[1], app),
    Tab::Reports => reports::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// Badge colour for a record status.
pub(crate) fn status_color(status: &AttendanceStatus) -> Color {
  match status {
    AttendanceStatus::Present => Color::Green,
    AttendanceStatus::Late => Color::Yellow,
    AttendanceStatus::Absent => Color::Red,
    AttendanceStatus::OnLeave => Color::Blue,
    AttendanceStatus::Unknown(_) => Color::DarkGray,
  }
}

/// `HH:MM` in local time, or `-`.
pub(crate) fn local_time(at: Option<DateTime<Utc>>) -> String {
  at.map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
    .unwrap_or_else(|| "-".into())
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let company = app
    .dashboard
    .as_ref()
    .map(|d| d.company_name.as_str())
    .unwrap_or("rollcall");

  let mut spans = vec![Span::styled(
    format!(" {company} "),
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
  )];
  for (i, tab) in Tab::ALL.into_iter().enumerate() {
    let style = if tab == app.tab {
      Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::raw(" "));
    spans.push(Span::styled(format!(" {} {} ", i + 1, tab.title()), style));
  }

  let date = Local::now().format("%A, %B %-d, %Y").to_string();
  let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize).saturating_sub(used + date.chars().count() + 1);
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(Span::styled(format!("{date} "), Style::default().fg(Color::Gray)));

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.tab {
    Tab::Employees if app.filter_active => ("SEARCH", "Type to filter  Esc clear  Enter done"),
    Tab::Dashboard => ("TODAY", "Tab/1-3 switch  F5 refresh  q quit"),
    Tab::Employees => ("STAFF", "↑↓/jk move  / search  c check in  o check out  q quit"),
    Tab::Reports => ("REPORT", "r next range  e export CSV  F5 refresh  q quit"),
  };

  let status = if app.status_msg.is_empty() { hints } else { app.status_msg.as_str() };

  let line = Line::from(vec![
    Span::styled(
      format!(" {mode_label} "),
      Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray)),
  ]);
  f.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Black)), area);
}
