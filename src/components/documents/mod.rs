pub mod handlers;
pub mod rendering;
pub mod state;

use color_eyre::eyre::Result;
use ratatui::prelude::*;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use super::Component;
use crate::{
  action::Action,
  config::Config,
  mode::Mode,
  table::{PageRequest, TableCallbacks, TableOptions, TableView},
};

/// Forwards table callbacks onto the action channel.
#[derive(Debug, Default)]
pub struct ActionCallbacks {
  pub tx: Option<UnboundedSender<Action>>,
}

impl ActionCallbacks {
  fn send(&self, action: Action) {
    match &self.tx {
      Some(tx) => {
        if let Err(e) = tx.send(action) {
          warn!("Dropped table action: {e}");
        }
      },
      None => warn!("Table action {action} raised before an action handler was registered"),
    }
  }
}

impl TableCallbacks for ActionCallbacks {
  fn fetch_data(&mut self, request: &PageRequest) {
    self.send(Action::FetchPage(request.clone()));
  }

  fn on_page_change(&mut self, page: usize) {
    self.send(Action::PageChanged(page));
  }
}

/// Which bound of the date range is being typed in the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
  From,
  To,
}

pub struct Documents {
  pub command_tx: Option<UnboundedSender<Action>>,
  pub config: Config,
  pub table: TableView<ActionCallbacks>,

  // Columns and cursor
  pub columns: Vec<String>,
  pub selected_column: usize,
  pub selected_row: usize,

  // Input
  pub mode: Mode,
  pub search_input: String,
  pub date_input: Option<(DateField, String)>,
  /// Search edits not yet run through the table.
  pub search_pending: bool,

  // Popups and status
  pub show_help: bool,
  pub error_message: Option<String>,
  pub is_loading: bool,
  pub source_name: String,
}

impl Default for Documents {
  fn default() -> Self {
    Self::new()
  }
}

impl Documents {
  pub fn new() -> Self {
    Self::new_with_config(None)
  }

  pub fn new_with_config(config: Option<Config>) -> Self {
    let config = config.unwrap_or_default();
    let table = TableView::new(table_options(&config), ActionCallbacks::default());
    Self {
      command_tx: None,
      config,
      table,
      columns: vec![],
      selected_column: 0,
      selected_row: 0,
      mode: Mode::Home,
      search_input: String::new(),
      date_input: None,
      search_pending: false,
      show_help: false,
      error_message: None,
      is_loading: false,
      source_name: String::new(),
    }
  }

  pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
    self.source_name = name.into();
    self
  }
}

pub(super) fn table_options(config: &Config) -> TableOptions {
  TableOptions {
    items_per_page: config.table.page_size,
    local_threshold: config.table.local_threshold,
    roles: config.table.roles.clone(),
  }
}

impl Component for Documents {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
    self.table.callbacks_mut().tx = Some(tx.clone());
    self.command_tx = Some(tx);
    Ok(())
  }

  fn register_config_handler(&mut self, config: Config) -> Result<()> {
    self.register_config_handler(config)
  }

  fn init(&mut self, _area: Rect) -> Result<()> {
    Ok(())
  }

  fn handle_events(&mut self, event: Option<crate::tui::Event>) -> Result<Option<Action>> {
    self.handle_events(event)
  }

  fn handle_key_events(&mut self, key: crossterm::event::KeyEvent) -> Result<Option<Action>> {
    self.handle_key_events(key)
  }

  fn update(&mut self, action: Action) -> Result<Option<Action>> {
    self.update(action)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    self.draw(f, area)
  }
}
