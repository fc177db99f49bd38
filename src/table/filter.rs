use super::{
  criteria::FilterCriteria,
  dates::{end_of_day, parse_query_date, parse_timestamp, start_of_day},
  models::{ColumnRoles, Row, SearchQueries},
};

/// Indices of the rows that pass the search and, unless the criteria are empty, the
/// date, status and file-type checks. Input order is kept.
pub fn filter_indices(
  rows: &[Row],
  search: &SearchQueries,
  criteria: Option<&FilterCriteria>,
  roles: &ColumnRoles,
) -> Vec<usize> {
  let criteria = criteria.filter(|c| !c.is_empty());
  rows
    .iter()
    .enumerate()
    .filter(|(_, row)| matches_search(row, search, roles))
    .filter(|(_, row)| criteria.map_or(true, |c| matches_criteria(row, c, roles)))
    .map(|(idx, _)| idx)
    .collect()
}

pub fn matches_search(row: &Row, search: &SearchQueries, roles: &ColumnRoles) -> bool {
  search.iter().all(|(column, query)| {
    if query.is_empty() {
      return true;
    }
    if roles.is_date_search(column) {
      return matches_date(row, column, query);
    }
    row.text(column).to_lowercase().contains(&query.to_lowercase())
  })
}

fn matches_date(row: &Row, column: &str, query: &str) -> bool {
  let Some(wanted) = parse_query_date(query) else {
    return false;
  };
  row.get(column).and_then(parse_timestamp).is_some_and(|ts| ts.date_naive() == wanted)
}

/// Date range, status and file-type checks. Callers skip this entirely for empty criteria.
pub fn matches_criteria(row: &Row, criteria: &FilterCriteria, roles: &ColumnRoles) -> bool {
  matches_date_range(row, criteria, roles) && matches_status(row, criteria, roles) && matches_file_type(row, criteria, roles)
}

fn matches_date_range(row: &Row, criteria: &FilterCriteria, roles: &ColumnRoles) -> bool {
  let Some(range) = criteria.date_range.as_ref().filter(|r| !r.is_unbounded()) else {
    return true;
  };
  // A bound that cannot be compared against excludes the row.
  let Some(ts) = row.get(&roles.timestamp).and_then(parse_timestamp) else {
    return false;
  };
  let after_start = range.from_date.and_then(start_of_day).map_or(true, |start| ts >= start);
  let before_end = range.to_date.and_then(end_of_day).map_or(true, |end| ts <= end);
  after_start && before_end
}

fn matches_status(row: &Row, criteria: &FilterCriteria, roles: &ColumnRoles) -> bool {
  match criteria.status {
    Some(flags) if flags.any() => {
      let status = row.text(&roles.status);
      flags.accepted().contains(&status.as_str())
    },
    _ => true,
  }
}

fn matches_file_type(row: &Row, criteria: &FilterCriteria, roles: &ColumnRoles) -> bool {
  match criteria.file_types {
    Some(flags) if flags.any() => {
      let content_type = row.text(&roles.content_type);
      flags.accepted().contains(&content_type.as_str())
    },
    _ => true,
  }
}
