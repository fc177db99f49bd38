use color_eyre::eyre::Result;
use ratatui::{
  prelude::*,
  text::{Line, Span},
  widgets::*,
};

use super::{DateField, Documents};
use crate::{
  mode::Mode,
  table::{dates::format_query_date, DataMode, FilterCriteria, SearchQueries, SortDirection},
  theme,
};

const FILTER_PANEL_WIDTH: u16 = 34;

impl Documents {
  pub(super) fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
      .split(area);

    let title_block = Block::default()
      .borders(Borders::ALL)
      .border_style(theme::STYLE_BORDER_NORMAL)
      .border_type(BorderType::Rounded)
      .style(theme::STYLE_BG_PRIMARY);
    let title = if self.source_name.is_empty() {
      "Fleet Documents".to_string()
    } else {
      format!("Fleet Documents - {}", self.source_name)
    };
    f.render_widget(Paragraph::new(Text::styled(title, *theme::STYLE_TITLE)).block(title_block), chunks[0]);

    f.render_widget(Paragraph::new(self.search_line()).style(theme::STYLE_INPUT), chunks[1]);

    let table_area = if self.mode == Mode::Filter {
      let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(FILTER_PANEL_WIDTH)])
        .split(chunks[2]);
      self.render_filter_panel(f, split[1]);
      split[0]
    } else {
      chunks[2]
    };
    self.render_table(f, table_area);

    let status = status_text(
      self.table.current_page(),
      self.table.page_count(),
      self.table.total_filtered_records(),
      self.table.mode(),
    );
    let status = if self.is_loading { format!("{status} · loading...") } else { status };
    f.render_widget(Paragraph::new(status).style(theme::STYLE_STATUS_BAR), chunks[3]);

    self.render_error(f)?;
    self.render_help(f)?;

    Ok(())
  }

  fn render_table(&mut self, f: &mut Frame<'_>, area: Rect) {
    let status_key = self.config.table.roles.status.clone();
    let (rows, sort_column, sort_direction) = {
      let output = if self.search_pending { self.table.preview() } else { self.table.render() };
      let rows: Vec<ratatui::widgets::Row<'static>> = output
        .displayed_items
        .iter()
        .map(|doc| {
          let cells = self.columns.iter().map(|column| {
            let text = doc.text(column);
            let style = if *column == status_key { theme::status(&text) } else { Style::default() };
            Cell::from(text).style(style)
          });
          ratatui::widgets::Row::new(cells)
        })
        .collect();
      (rows, output.sort_column.map(str::to_string), output.sort_direction)
    };

    let header = ratatui::widgets::Row::new(self.columns.iter().enumerate().map(|(i, column)| {
      let style = if i == self.selected_column { *theme::STYLE_HEADER_ACTIVE } else { *theme::STYLE_HEADER };
      Cell::from(header_label(column, sort_column.as_deref(), sort_direction)).style(style)
    }))
    .bottom_margin(1);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(theme::border(self.mode == Mode::Home))
      .title("Documents")
      .title_style(*theme::STYLE_TITLE)
      .border_type(BorderType::Rounded);

    if rows.is_empty() {
      let message = if self.is_loading { "Loading documents..." } else { "No documents match the current search." };
      let empty = Paragraph::new(message).block(block).style(theme::STYLE_MUTED).alignment(Alignment::Center);
      f.render_widget(empty, area);
      return;
    }

    let widths = vec![Constraint::Fill(1); self.columns.len().max(1)];
    let table = Table::new(rows, widths)
      .header(header)
      .block(block)
      .row_highlight_style(*theme::STYLE_SELECTION)
      .style(theme::STYLE_BG_PRIMARY)
      .column_spacing(1);

    let mut table_state = TableState::default();
    table_state.select(Some(self.selected_row));
    f.render_stateful_widget(table, area, &mut table_state);
  }

  fn search_line(&self) -> Line<'static> {
    if self.mode == Mode::Search {
      let column = self.focused_column().unwrap_or_default();
      return Line::from(vec![
        Span::styled(format!(" Search {column}: "), *theme::STYLE_TITLE),
        Span::raw(format!("{}_", self.search_input)),
      ]);
    }
    Line::from(Span::styled(search_summary(self.table.search_queries()), theme::STYLE_MUTED))
  }

  fn render_filter_panel(&self, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(theme::border(true))
      .title("Filters")
      .title_style(*theme::STYLE_TITLE)
      .border_type(BorderType::Rounded);
    let mut lines = filter_lines(self.table.filter_criteria(), self.date_input.as_ref());
    if self.table.mode() == DataMode::Delegated {
      lines.push(Line::from(""));
      lines.push(Line::from(Span::styled("Paging on the server: filters", *theme::STYLE_WARNING)));
      lines.push(Line::from(Span::styled("here only apply to local data.", *theme::STYLE_WARNING)));
    }
    f.render_widget(Paragraph::new(lines).block(block).style(theme::STYLE_BG_PRIMARY), area);
  }

  fn render_error(&mut self, f: &mut Frame<'_>) -> Result<()> {
    if let Some(error) = &self.error_message {
      let area = centered_rect(60, 20, f.area());
      f.render_widget(Clear, area);

      let error_block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .border_style(*theme::STYLE_ERROR)
        .border_type(BorderType::Rounded);

      let error_text = Paragraph::new(error.as_str())
        .block(error_block)
        .style(*theme::STYLE_ERROR)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

      f.render_widget(error_text, area);
    }
    Ok(())
  }

  fn render_help(&mut self, f: &mut Frame<'_>) -> Result<()> {
    if self.show_help {
      let area = centered_rect(70, 80, f.area());
      f.render_widget(Clear, area);

      let help_block = Block::default()
        .title("Help - Press ? or Esc to close")
        .borders(Borders::ALL)
        .border_style(theme::STYLE_BORDER_FOCUSED)
        .border_type(BorderType::Rounded);

      let help_text = vec![
        Line::from(vec![Span::styled("Navigation", *theme::STYLE_HEADER)]),
        Line::from("↑/↓, k/j - Move between rows"),
        Line::from("←/→, h/l - Move between columns"),
        Line::from("n/p - Next/previous page"),
        Line::from("g/G - First/last page"),
        Line::from(""),
        Line::from(vec![Span::styled("Search and sort", *theme::STYLE_HEADER)]),
        Line::from("/ - Search the focused column (Enter keeps, Esc clears)"),
        Line::from("s - Sort by the focused column, again to reverse"),
        Line::from("S - Reverse the sort direction"),
        Line::from("x - Clear sort"),
        Line::from(""),
        Line::from(vec![Span::styled("Filters", *theme::STYLE_HEADER)]),
        Line::from("f - Open the filter panel"),
        Line::from("a/r/p - Approved/rejected/pending"),
        Line::from("1-4 - PNG/JPG/PDF/DOC"),
        Line::from("f/t - From/to date (MM-DD-YYYY)"),
        Line::from("c - Clear search and filters"),
        Line::from(""),
        Line::from("r - Reload documents"),
        Line::from("q - Quit"),
      ];

      let help_paragraph =
        Paragraph::new(help_text).block(help_block).style(theme::STYLE_BG_PRIMARY).wrap(Wrap { trim: false });

      f.render_widget(help_paragraph, area);
    }
    Ok(())
  }
}

pub fn status_text(page: usize, page_count: usize, total: usize, mode: DataMode) -> String {
  format!("Page {page}/{} · {total} records · {mode}", page_count.max(1))
}

pub fn header_label(column: &str, sort_column: Option<&str>, direction: SortDirection) -> String {
  match (sort_column, direction) {
    (Some(sorted), SortDirection::Ascending) if sorted == column => format!("{column} ▲"),
    (Some(sorted), SortDirection::Descending) if sorted == column => format!("{column} ▼"),
    _ => column.to_string(),
  }
}

pub fn search_summary(queries: &SearchQueries) -> String {
  let active: Vec<String> = queries
    .iter()
    .filter(|(_, query)| !query.trim().is_empty())
    .map(|(column, query)| format!("{column}: {}", query.trim()))
    .collect();
  if active.is_empty() {
    " Press / to search the focused column".to_string()
  } else {
    format!(" {}", active.join("  "))
  }
}

fn checkbox(label: &str, key: &str, checked: bool) -> Line<'static> {
  let mark = if checked { "[x]" } else { "[ ]" };
  let style = if checked { *theme::STYLE_SUCCESS } else { Style::default() };
  Line::from(vec![Span::styled(format!(" {mark} "), style), Span::raw(format!("{label} ({key})"))])
}

pub fn filter_lines(criteria: Option<&FilterCriteria>, date_input: Option<&(DateField, String)>) -> Vec<Line<'static>> {
  let status = criteria.and_then(|c| c.status).unwrap_or_default();
  let types = criteria.and_then(|c| c.file_types).unwrap_or_default();
  let range = criteria.and_then(|c| c.date_range.clone()).unwrap_or_default();

  let date_line = |label: &str, key: &str, field: DateField, value: Option<chrono::NaiveDate>| {
    let shown = match date_input {
      Some((editing, buffer)) if *editing == field => format!("{buffer}_"),
      _ => value.map(format_query_date).unwrap_or_else(|| "any".to_string()),
    };
    Line::from(format!(" {label} ({key}): {shown}"))
  };

  vec![
    Line::from(Span::styled(" Status", *theme::STYLE_HEADER)),
    checkbox("Approved", "a", status.approved),
    checkbox("Rejected", "r", status.rejected),
    checkbox("Pending", "p", status.pending),
    Line::from(Span::styled(" File type", *theme::STYLE_HEADER)),
    checkbox("PNG", "1", types.png),
    checkbox("JPG", "2", types.jpg),
    checkbox("PDF", "3", types.pdf),
    checkbox("DOC", "4", types.doc),
    Line::from(Span::styled(" Uploaded", *theme::STYLE_HEADER)),
    date_line("From", "f", DateField::From, range.from_date),
    date_line("To", "t", DateField::To, range.to_date),
  ]
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
  let popup_layout = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - percent_y) / 2),
      Constraint::Percentage(percent_y),
      Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - percent_x) / 2),
      Constraint::Percentage(percent_x),
      Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
