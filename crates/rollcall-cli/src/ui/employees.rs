//! Employees tab: filterable roster with today's status per person.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use rollcall_core::employee::{Department, EmployeeStatus};

use super::{local_time, status_color};
use crate::app::App;

/// Render the roster into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_employees();
  let total = app.employees.len();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Employees ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Employees ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|employee| {
      let mut spans = vec![
        Span::styled(
          format!(" {:<3}", employee.initials()),
          Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{:<24}", employee.full_name)),
        Span::styled(
          format!("{:<12}", Department::label(employee.department)),
          Style::default().fg(Color::Gray),
        ),
      ];

      match (employee.status, app.today_record(employee)) {
        (EmployeeStatus::Inactive, _) => {
          spans.push(Span::styled("inactive", Style::default().fg(Color::DarkGray)));
        }
        (_, Some(record)) => {
          spans.push(Span::styled(
            format!("{:<9}", record.status.label()),
            Style::default().fg(status_color(&record.status)),
          ));
          spans.push(Span::styled(
            format!(
              "{} → {}",
              local_time(record.check_in_time),
              local_time(record.check_out_time)
            ),
            Style::default().fg(Color::DarkGray),
          ));
        }
        (_, None) => {
          spans.push(Span::styled("not checked in", Style::default().fg(Color::DarkGray)));
        }
      }

      ListItem::new(Line::from(spans))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let mut state = ListState::default();
  state.select((!filtered.is_empty()).then_some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
