use color_eyre::eyre::Result;
use tracing::{debug, info};

use super::{table_options, Documents};
use crate::{
  action::Action,
  config::Config,
  mode::Mode,
  table::{DataMode, Row, SearchQueries, TableView},
};

impl Documents {
  pub(super) fn register_config_handler(&mut self, config: Config) -> Result<()> {
    let callbacks = std::mem::take(self.table.callbacks_mut());
    self.table = TableView::new(table_options(&config), callbacks);
    self.config = config;
    Ok(())
  }

  pub(super) fn update(&mut self, action: Action) -> Result<Option<Action>> {
    match action {
      Action::Tick => {
        if self.search_pending {
          self.refresh();
        }
      },
      Action::LoadDocuments => {
        self.is_loading = true;
      },
      Action::DocumentsLoaded(rows, total) => {
        info!(rows = rows.len(), total, "documents loaded");
        self.is_loading = false;
        self.columns = self.derive_columns(&rows);
        self.selected_column = self.selected_column.min(self.columns.len().saturating_sub(1));
        self.table.set_rows(rows, total);
        self.refresh();
      },
      Action::PageLoaded(request, rows, total) => {
        if self.table.last_request() != Some(&request) {
          debug!(page = request.page, "discarding stale page");
          return Ok(None);
        }
        self.is_loading = false;
        if self.columns.is_empty() {
          self.columns = self.derive_columns(&rows);
        }
        self.table.receive_page(rows, total);
        self.refresh();
      },
      Action::FetchPage(_) => {
        self.is_loading = true;
      },
      Action::NextPage => {
        if self.table.current_page() < self.table.page_count() {
          self.table.handle_page_change(self.table.current_page() + 1);
          self.refresh();
        }
      },
      Action::PrevPage => {
        if self.table.current_page() > 1 {
          self.table.handle_page_change(self.table.current_page() - 1);
          self.refresh();
        }
      },
      Action::FirstPage => {
        self.table.handle_page_change(1);
        self.refresh();
      },
      Action::LastPage => {
        self.table.handle_page_change(self.table.page_count().max(1));
        self.refresh();
      },
      Action::RowMoveDown => {
        let count = self.visible_rows();
        if count > 0 {
          self.selected_row = if self.selected_row + 1 < count { self.selected_row + 1 } else { 0 };
        }
      },
      Action::RowMoveUp => {
        let count = self.visible_rows();
        if count > 0 {
          self.selected_row = if self.selected_row > 0 { self.selected_row - 1 } else { count - 1 };
        }
      },
      Action::ColumnRight => {
        if !self.columns.is_empty() {
          self.selected_column = (self.selected_column + 1) % self.columns.len();
        }
      },
      Action::ColumnLeft => {
        if !self.columns.is_empty() {
          self.selected_column = (self.selected_column + self.columns.len() - 1) % self.columns.len();
        }
      },
      Action::StartSearch => {
        if let Some(column) = self.focused_column() {
          self.search_input = self.table.search_queries().get(&column).cloned().unwrap_or_default();
          self.mode = Mode::Search;
          return Ok(Some(Action::SwitchMode(Mode::Search)));
        }
      },
      Action::CycleSortColumn => {
        if let Some(column) = self.focused_column() {
          self.table.toggle_sort(&column);
          self.refresh();
        }
      },
      Action::ToggleSortDirection => {
        if let Some(column) = self.table.sort_column().map(str::to_string) {
          self.table.handle_sort(column, self.table.sort_direction().toggled());
          self.refresh();
        }
      },
      Action::ClearSort => {
        self.table.clear_sort();
        self.refresh();
      },
      Action::ToggleFilterPanel => {
        self.mode = if self.mode == Mode::Filter { Mode::Home } else { Mode::Filter };
        self.date_input = None;
        return Ok(Some(Action::SwitchMode(self.mode)));
      },
      Action::ClearFilters => {
        self.table.set_filter_criteria(None);
        self.table.set_search_queries(SearchQueries::new());
        self.refresh();
      },
      Action::SwitchMode(mode) => {
        self.mode = mode;
      },
      Action::Help => {
        self.show_help = !self.show_help;
      },
      Action::Error(message) => {
        self.is_loading = false;
        self.error_message = Some(message);
      },
      _ => {},
    }
    Ok(None)
  }

  /// Runs the table's render pass outside of drawing so resets and fetches happen right away.
  pub fn refresh(&mut self) {
    self.search_pending = false;
    let shown = self.table.render().displayed_items.len();
    if shown == 0 {
      self.selected_row = 0;
    } else {
      self.selected_row = self.selected_row.min(shown - 1);
    }
  }

  pub fn visible_rows(&mut self) -> usize {
    self.table.render().displayed_items.len()
  }

  pub fn focused_column(&self) -> Option<String> {
    self.columns.get(self.selected_column).cloned()
  }

  pub fn data_mode(&self) -> DataMode {
    self.table.mode()
  }

  fn derive_columns(&self, rows: &[Row]) -> Vec<String> {
    if !self.config.table.columns.is_empty() {
      return self.config.table.columns.clone();
    }
    let mut columns: Vec<String> = vec![];
    for row in rows {
      for key in row.keys() {
        if !columns.iter().any(|c| c == key) {
          columns.push(key.to_string());
        }
      }
    }
    columns
  }
}
