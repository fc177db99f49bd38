//! View-model behind the paginated document tables.
//!
//! Small tables are filtered, sorted and paged in memory. Once the record count reaches
//! the configured threshold the view stops touching rows itself and forwards page, sort
//! and search parameters to the caller through [`TableCallbacks::fetch_data`].

pub mod change;
pub mod criteria;
pub mod dates;
pub mod filter;
pub mod models;
pub mod paginate;
pub mod sort;

pub use change::ChangeTracker;
pub use criteria::{DateRange, FileTypeFlags, FilterCriteria, StatusFlags};
pub use models::{
  CellValue, ColumnRoles, DataMode, Row, SearchQueries, SortDirection, SortKind, DEFAULT_PAGE_SIZE,
  LOCAL_MODE_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters handed to the server when paging is delegated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
  pub page: usize,
  pub page_size: usize,
  pub sort_column: Option<String>,
  pub sort_direction: SortDirection,
  pub search_queries: SearchQueries,
}

/// Hooks a table calls back into. Any `FnMut(&PageRequest)` closure works as a fetcher
/// that ignores page notifications.
pub trait TableCallbacks {
  fn fetch_data(&mut self, request: &PageRequest);

  fn on_page_change(&mut self, _page: usize) {}
}

impl<F> TableCallbacks for F
where
  F: FnMut(&PageRequest),
{
  fn fetch_data(&mut self, request: &PageRequest) {
    self(request)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
  pub items_per_page: usize,
  pub local_threshold: usize,
  pub roles: ColumnRoles,
}

impl Default for TableOptions {
  fn default() -> Self {
    Self { items_per_page: DEFAULT_PAGE_SIZE, local_threshold: LOCAL_MODE_THRESHOLD, roles: ColumnRoles::default() }
  }
}

/// What a render produces.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOutput<'a> {
  pub displayed_items: Vec<&'a Row>,
  pub current_page: usize,
  pub sort_column: Option<&'a str>,
  pub sort_direction: SortDirection,
  pub total_filtered_records: usize,
  pub mode: DataMode,
}

pub struct TableView<C: TableCallbacks> {
  options: TableOptions,
  callbacks: C,
  rows: Vec<Row>,
  total_records: usize,
  server_total: usize,
  search_queries: SearchQueries,
  filter_criteria: Option<FilterCriteria>,
  sort_column: Option<String>,
  sort_direction: SortDirection,
  current_page: usize,
  tracker: ChangeTracker,
  last_request: Option<PageRequest>,
  /// Sorted, filtered row indices for local mode. `None` when stale.
  derived: Option<Vec<usize>>,
  last_mode: Option<DataMode>,
}

impl<C: TableCallbacks> TableView<C> {
  pub fn new(options: TableOptions, callbacks: C) -> Self {
    let options = TableOptions { items_per_page: options.items_per_page.max(1), ..options };
    Self {
      options,
      callbacks,
      rows: vec![],
      total_records: 0,
      server_total: 0,
      search_queries: SearchQueries::new(),
      filter_criteria: None,
      sort_column: None,
      sort_direction: SortDirection::Ascending,
      current_page: 1,
      tracker: ChangeTracker::new(),
      last_request: None,
      derived: None,
      last_mode: None,
    }
  }

  pub fn options(&self) -> &TableOptions {
    &self.options
  }

  pub fn callbacks(&self) -> &C {
    &self.callbacks
  }

  pub fn callbacks_mut(&mut self) -> &mut C {
    &mut self.callbacks
  }

  pub fn mode(&self) -> DataMode {
    DataMode::for_total(self.total_records, self.options.local_threshold)
  }

  /// Replaces the source rows. `total_records` decides local or delegated mode. In delegated
  /// mode the next render fetches the current page again.
  pub fn set_rows(&mut self, rows: Vec<Row>, total_records: usize) {
    self.rows = rows;
    self.total_records = total_records;
    self.server_total = total_records;
    self.derived = None;
    self.last_request = None;
  }

  pub fn set_total_records(&mut self, total_records: usize) {
    let previous = self.mode();
    self.total_records = total_records;
    self.derived = None;
    if self.mode() != previous {
      self.last_request = None;
    }
  }

  /// Installs a page returned by the server. Does not change the mode.
  pub fn receive_page(&mut self, rows: Vec<Row>, total_count: usize) {
    self.rows = rows;
    self.server_total = total_count;
    self.derived = None;
  }

  pub fn rows(&self) -> &[Row] {
    &self.rows
  }

  pub fn total_records(&self) -> usize {
    self.total_records
  }

  pub fn search_queries(&self) -> &SearchQueries {
    &self.search_queries
  }

  pub fn set_search_queries(&mut self, queries: SearchQueries) {
    if queries != self.search_queries {
      self.search_queries = queries;
      self.derived = None;
    }
  }

  pub fn set_search_query(&mut self, column: impl Into<String>, text: impl Into<String>) {
    let column = column.into();
    let text = text.into();
    if self.search_queries.get(&column) != Some(&text) {
      self.search_queries.insert(column, text);
      self.derived = None;
    }
  }

  pub fn clear_search_query(&mut self, column: &str) {
    if self.search_queries.remove(column).is_some() {
      self.derived = None;
    }
  }

  pub fn filter_criteria(&self) -> Option<&FilterCriteria> {
    self.filter_criteria.as_ref()
  }

  pub fn set_filter_criteria(&mut self, criteria: Option<FilterCriteria>) {
    if criteria != self.filter_criteria {
      self.filter_criteria = criteria;
      self.derived = None;
    }
  }

  pub fn sort_column(&self) -> Option<&str> {
    self.sort_column.as_deref()
  }

  pub fn sort_direction(&self) -> SortDirection {
    self.sort_direction
  }

  pub fn handle_sort(&mut self, column: impl Into<String>, direction: SortDirection) {
    self.sort_column = Some(column.into());
    self.sort_direction = direction;
    self.derived = None;
  }

  /// Sorts by `column` ascending, or flips the direction if it is already the sort column.
  pub fn toggle_sort(&mut self, column: &str) {
    let direction = match self.sort_column.as_deref() {
      Some(current) if current == column => self.sort_direction.toggled(),
      _ => SortDirection::Ascending,
    };
    self.handle_sort(column, direction);
  }

  pub fn clear_sort(&mut self) {
    self.sort_column = None;
    self.sort_direction = SortDirection::Ascending;
    self.derived = None;
  }

  pub fn current_page(&self) -> usize {
    self.current_page
  }

  pub fn handle_page_change(&mut self, new_page: usize) {
    let new_page = new_page.max(1);
    if new_page != self.current_page {
      self.current_page = new_page;
      self.callbacks.on_page_change(new_page);
    }
  }

  /// Filtered record count: local matches, or whatever the server last reported.
  pub fn total_filtered_records(&self) -> usize {
    match self.mode() {
      DataMode::Local => match &self.derived {
        Some(indices) => indices.len(),
        None => filter::filter_indices(&self.rows, &self.search_queries, self.filter_criteria.as_ref(), &self.options.roles).len(),
      },
      DataMode::Delegated => self.server_total,
    }
  }

  pub fn page_count(&self) -> usize {
    paginate::page_count(self.total_filtered_records(), self.options.items_per_page)
  }

  pub fn last_request(&self) -> Option<&PageRequest> {
    self.last_request.as_ref()
  }

  pub fn page_request(&self, page: usize) -> PageRequest {
    PageRequest {
      page,
      page_size: self.options.items_per_page,
      sort_column: self.sort_column.clone(),
      sort_direction: self.sort_direction,
      search_queries: self.search_queries.clone(),
    }
  }

  /// Runs change detection and the delegated fetch, then produces the visible page.
  pub fn render(&mut self) -> TableOutput<'_> {
    let mode = self.mode();
    if self.last_mode != Some(mode) {
      debug!(%mode, total_records = self.total_records, "table mode selected");
      self.last_mode = Some(mode);
    }

    let changed = self.tracker.observe(
      &self.search_queries,
      self.filter_criteria.as_ref(),
      self.sort_column.as_deref(),
      self.sort_direction,
    );
    if changed && self.current_page != 1 {
      debug!(from = self.current_page, "query changed, resetting to first page");
      self.current_page = 1;
      self.callbacks.on_page_change(1);
      if mode == DataMode::Delegated {
        self.fetch(self.page_request(1));
      }
    }

    match mode {
      DataMode::Delegated => {
        let request = self.page_request(self.current_page);
        if self.last_request.as_ref() != Some(&request) {
          self.fetch(request);
        }
      },
      DataMode::Local => {
        self.last_request = None;
        if self.derived.is_none() {
          self.derived = Some(self.local_indices());
        }
      },
    }

    self.output()
  }

  /// The visible page for the current state without change detection or fetching. Page
  /// resets and fetches wait for the next [`TableView::render`].
  pub fn preview(&self) -> TableOutput<'_> {
    match (self.mode(), &self.derived) {
      (DataMode::Local, None) => self.local_output(&self.local_indices()),
      _ => self.output(),
    }
  }

  fn fetch(&mut self, request: PageRequest) {
    debug!(page = request.page, sort = ?request.sort_column, "fetching page from server");
    self.callbacks.fetch_data(&request);
    self.last_request = Some(request);
  }

  fn local_indices(&self) -> Vec<usize> {
    let roles = &self.options.roles;
    let mut indices = filter::filter_indices(&self.rows, &self.search_queries, self.filter_criteria.as_ref(), roles);
    if let Some(column) = self.sort_column.as_deref() {
      sort::sort_indices(&mut indices, &self.rows, column, self.sort_direction, roles);
    }
    indices
  }

  fn output(&self) -> TableOutput<'_> {
    match (self.mode(), &self.derived) {
      (DataMode::Local, Some(indices)) => self.local_output(indices),
      (DataMode::Local, None) => self.local_output(&[]),
      (DataMode::Delegated, _) => self.page_output(self.rows.iter().collect(), self.server_total),
    }
  }

  fn local_output(&self, indices: &[usize]) -> TableOutput<'_> {
    let page = paginate::page_slice(indices, self.current_page, self.options.items_per_page);
    self.page_output(page.iter().map(|&i| &self.rows[i]).collect(), indices.len())
  }

  fn page_output<'a>(&'a self, displayed_items: Vec<&'a Row>, total_filtered_records: usize) -> TableOutput<'a> {
    TableOutput {
      displayed_items,
      current_page: self.current_page,
      sort_column: self.sort_column.as_deref(),
      sort_direction: self.sort_direction,
      total_filtered_records,
      mode: self.mode(),
    }
  }
}
