//! Dashboard tab: today's summary cards and record lists.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, Paragraph},
};
use rollcall_core::{aggregate::DailySummary, record::AttendanceRecord};

use super::{local_time, status_color};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(dashboard) = &app.dashboard else {
    f.render_widget(
      Paragraph::new("Loading…").style(Style::default().fg(Color::DarkGray)),
      area,
    );
    return;
  };

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(4), Constraint::Min(0)])
    .split(area);
  draw_cards(f, rows[0], &dashboard.summary);

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(rows[1]);
  draw_records(f, cols[0], " Today ", &dashboard.today, false);
  draw_records(f, cols[1], " Recent activity ", &dashboard.recent, true);
}

fn draw_cards(f: &mut Frame, area: Rect, summary: &DailySummary) {
  let cards = [
    ("Employees", summary.total_active, Color::White),
    ("Checked in", summary.checked_in, Color::Cyan),
    ("Present", summary.present, Color::Green),
    ("Late", summary.late, Color::Yellow),
    ("Absent", summary.absent, Color::Red),
    ("Pending", summary.pending, Color::Gray),
  ];
  let cells = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, cards.len() as u32); 6])
    .split(area);

  for ((title, value, color), cell) in cards.into_iter().zip(cells.iter()) {
    let block = Block::default()
      .title(format!(" {title} "))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let value = Paragraph::new(Line::from(Span::styled(
      value.to_string(),
      Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(block);
    f.render_widget(value, *cell);
  }
}

fn draw_records(
  f: &mut Frame,
  area: Rect,
  title: &str,
  records: &[AttendanceRecord],
  with_date: bool,
) {
  let block = Block::default()
    .title(title.to_owned())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if records.is_empty() {
    f.render_widget(
      Paragraph::new("No records.").style(Style::default().fg(Color::DarkGray)).block(block),
      area,
    );
    return;
  }

  let items: Vec<ListItem> = records
    .iter()
    .map(|r| {
      let mut spans = Vec::with_capacity(5);
      if with_date {
        spans.push(Span::styled(
          format!("{} ", r.date.format("%m-%d")),
          Style::default().fg(Color::DarkGray),
        ));
      }
      spans.push(Span::raw(format!("{:<24}", r.employee_name)));
      spans.push(Span::raw(format!(
        "{} → {}  ",
        local_time(r.check_in_time),
        local_time(r.check_out_time)
      )));
      spans.push(Span::styled(
        r.status.label().to_owned(),
        Style::default().fg(status_color(&r.status)),
      ));
      ListItem::new(Line::from(spans))
    })
    .collect();

  f.render_widget(List::new(items).block(block), area);
}
