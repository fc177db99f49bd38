use std::{cmp::Ordering, collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use strum::Display;

/// Row counts at or above this are paged by the server instead of in memory.
pub const LOCAL_MODE_THRESHOLD: usize = 50_000;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A single value read out of a document row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
  Null,
  Bool(bool),
  Number(f64),
  Text(String),
  /// Nested objects and arrays are kept verbatim and shown as JSON.
  Json(serde_json::Value),
}

impl CellValue {
  pub fn as_text(&self) -> Option<&str> {
    match self {
      CellValue::Text(s) => Some(s),
      _ => None,
    }
  }

  /// Numeric reading of the value, `None` when it is not a number and does not parse as one.
  pub fn as_number(&self) -> Option<f64> {
    match self {
      CellValue::Number(n) => Some(*n),
      CellValue::Text(s) => s.trim().parse::<f64>().ok(),
      _ => None,
    }
  }

  /// Raw `<` / `>` comparison. Values of unrelated kinds compare equal.
  pub fn raw_cmp(&self, other: &CellValue) -> Ordering {
    match (self, other) {
      (CellValue::Number(a), CellValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
      (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
      (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
      (CellValue::Number(a), CellValue::Text(_)) => {
        other.as_number().and_then(|b| a.partial_cmp(&b)).unwrap_or(Ordering::Equal)
      },
      (CellValue::Text(_), CellValue::Number(b)) => {
        self.as_number().and_then(|a| a.partial_cmp(b)).unwrap_or(Ordering::Equal)
      },
      _ => Ordering::Equal,
    }
  }
}

impl fmt::Display for CellValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CellValue::Null => Ok(()),
      CellValue::Bool(b) => write!(f, "{b}"),
      CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
      CellValue::Number(n) => write!(f, "{n}"),
      CellValue::Text(s) => f.write_str(s),
      CellValue::Json(v) => write!(f, "{v}"),
    }
  }
}

impl From<&str> for CellValue {
  fn from(value: &str) -> Self {
    CellValue::Text(value.to_string())
  }
}

impl From<String> for CellValue {
  fn from(value: String) -> Self {
    CellValue::Text(value)
  }
}

impl From<f64> for CellValue {
  fn from(value: f64) -> Self {
    CellValue::Number(value)
  }
}

impl From<i64> for CellValue {
  fn from(value: i64) -> Self {
    CellValue::Number(value as f64)
  }
}

impl From<bool> for CellValue {
  fn from(value: bool) -> Self {
    CellValue::Bool(value)
  }
}

/// A document, vehicle, driver or any other record shown in a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, CellValue>);

impl Row {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
    self.insert(key, value);
    self
  }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
    self.0.insert(key.into(), value.into());
  }

  pub fn get(&self, key: &str) -> Option<&CellValue> {
    self.0.get(key)
  }

  /// String form of a field; missing and null fields read as empty.
  pub fn text(&self, key: &str) -> String {
    self.get(key).map(|v| v.to_string()).unwrap_or_default()
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Row(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
  #[default]
  #[strum(serialize = "asc")]
  Ascending,
  #[strum(serialize = "desc")]
  Descending,
}

impl SortDirection {
  pub fn toggled(self) -> Self {
    match self {
      SortDirection::Ascending => SortDirection::Descending,
      SortDirection::Descending => SortDirection::Ascending,
    }
  }

  pub fn apply(self, ordering: Ordering) -> Ordering {
    match self {
      SortDirection::Ascending => ordering,
      SortDirection::Descending => ordering.reverse(),
    }
  }
}

/// Where filtering, sorting and paging happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum DataMode {
  #[strum(serialize = "local")]
  Local,
  #[strum(serialize = "server")]
  Delegated,
}

impl DataMode {
  pub fn for_total(total_records: usize, threshold: usize) -> Self {
    if total_records < threshold {
      DataMode::Local
    } else {
      DataMode::Delegated
    }
  }
}

/// How the sort stage compares a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
  Numeric,
  Date,
  Text,
  Raw,
}

/// Keys of the fields that carry meaning beyond plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRoles {
  /// Upload/event time. Also the column whose search box takes a calendar date.
  pub timestamp: String,
  pub status: String,
  pub content_type: String,
  pub numeric: Vec<String>,
  pub dates: Vec<String>,
  pub names: Vec<String>,
}

impl Default for ColumnRoles {
  fn default() -> Self {
    Self {
      timestamp: "uploadedAt".to_string(),
      status: "status".to_string(),
      content_type: "contentType".to_string(),
      numeric: vec!["size".to_string()],
      dates: vec!["uploadedAt".to_string()],
      names: vec!["fileName".to_string(), "name".to_string()],
    }
  }
}

impl ColumnRoles {
  pub fn sort_kind(&self, column: &str) -> SortKind {
    if self.numeric.iter().any(|c| c == column) {
      SortKind::Numeric
    } else if column == self.timestamp || self.dates.iter().any(|c| c == column) {
      SortKind::Date
    } else if self.names.iter().any(|c| c == column) {
      SortKind::Text
    } else {
      SortKind::Raw
    }
  }

  pub fn is_date_search(&self, column: &str) -> bool {
    column == self.timestamp
  }
}

/// Per-column free-text search. Keys are column names.
pub type SearchQueries = BTreeMap<String, String>;
