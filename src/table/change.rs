use super::{
  criteria::FilterCriteria,
  models::{SearchQueries, SortDirection},
};

#[derive(Debug, Clone, PartialEq)]
struct QuerySnapshot {
  search: SearchQueries,
  filter: Option<serde_json::Value>,
  sort_column: Option<String>,
  sort_direction: SortDirection,
}

/// Remembers the query state seen by the previous render of one table.
#[derive(Debug, Default)]
pub struct ChangeTracker {
  previous: Option<QuerySnapshot>,
}

impl ChangeTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records the current query state and reports whether it differs meaningfully from the
  /// previous one. The first observation never reports a change.
  pub fn observe(
    &mut self,
    search: &SearchQueries,
    filter: Option<&FilterCriteria>,
    sort_column: Option<&str>,
    sort_direction: SortDirection,
  ) -> bool {
    let current = QuerySnapshot {
      search: search.clone(),
      filter: serialized(filter),
      sort_column: sort_column.map(str::to_string),
      sort_direction,
    };

    let changed = match &self.previous {
      None => false,
      Some(previous) => {
        search_changed(&previous.search, &current.search)
          || previous.filter != current.filter
          || previous.sort_column != current.sort_column
          || previous.sort_direction != current.sort_direction
      },
    };

    self.previous = Some(current);
    changed
  }
}

fn serialized(filter: Option<&FilterCriteria>) -> Option<serde_json::Value> {
  filter.and_then(|f| serde_json::to_value(f).ok())
}

/// Whitespace-only edits and blank-to-blank transitions are not changes.
pub fn search_changed(previous: &SearchQueries, current: &SearchQueries) -> bool {
  if active_keys(previous) != active_keys(current) {
    return true;
  }
  previous.keys().chain(current.keys()).any(|key| {
    let before = previous.get(key).map_or("", |v| v.trim());
    let after = current.get(key).map_or("", |v| v.trim());
    before != after && !(before.is_empty() && after.is_empty())
  })
}

fn active_keys(queries: &SearchQueries) -> usize {
  queries.values().filter(|v| !v.trim().is_empty()).count()
}
