//! Reports tab: range summary, status breakdown and department tallies.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Gauge, Paragraph, Row, Table},
};
use rollcall_core::aggregate::RangeReport;

use super::status_color;
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Reports · {} ", app.range.label()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(report) = &app.report else {
    f.render_widget(
      Paragraph::new("Press F5 to load the report.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(2), Constraint::Length(6), Constraint::Min(0)])
    .split(inner);

  draw_totals(f, rows[0], report);
  draw_breakdown(f, rows[1], report);
  draw_departments(f, rows[2], report);
}

fn draw_totals(f: &mut Frame, area: Rect, report: &RangeReport) {
  let bold = Style::default().add_modifier(Modifier::BOLD);
  let line = Line::from(vec![
    Span::styled(
      format!("{} – {}   ", report.interval.start, report.interval.end),
      Style::default().fg(Color::Gray),
    ),
    Span::raw("records "),
    Span::styled(report.total_records.to_string(), bold),
    Span::raw("   active employees "),
    Span::styled(report.active_employees.to_string(), bold),
    Span::raw("   attendance rate "),
    Span::styled(format!("{:.1}%", report.attendance_rate), bold.fg(Color::Green)),
  ]);
  f.render_widget(Paragraph::new(line), area);
}

fn draw_breakdown(f: &mut Frame, area: Rect, report: &RangeReport) {
  let constraints = vec![Constraint::Length(1); report.breakdown.len()];
  let cells = Layout::default()
    .direction(Direction::Vertical)
    .constraints(constraints)
    .split(area);

  for (share, cell) in report.breakdown.iter().zip(cells.iter()) {
    let gauge = Gauge::default()
      .gauge_style(Style::default().fg(status_color(&share.status)).bg(Color::Black))
      .percent(share.percent.min(100) as u16)
      .label(format!("{:<9} {:>4}  {:>3}%", share.label, share.count, share.percent));
    f.render_widget(gauge, *cell);
  }
}

fn draw_departments(f: &mut Frame, area: Rect, report: &RangeReport) {
  let header = Row::new(["Department", "Present", "Late"])
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
  let rows = report.by_department.iter().map(|d| {
    Row::new([d.department.clone(), d.present.to_string(), d.late.to_string()])
  });
  let table = Table::new(rows, [
    Constraint::Length(16),
    Constraint::Length(9),
    Constraint::Length(6),
  ])
  .header(header)
  .block(
    Block::default()
      .title(" By department ")
      .borders(Borders::TOP)
      .border_style(Style::default().fg(Color::DarkGray)),
  );
  f.render_widget(table, area);
}
