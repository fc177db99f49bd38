use std::{
  path::{Path, PathBuf},
  sync::Mutex,
};

use async_trait::async_trait;
use color_eyre::eyre::{self, Result, WrapErr};
use sqlx::{
  sqlite::{SqliteConnectOptions, SqliteRow},
  Row as _, TypeInfo, ValueRef,
};
use tracing::{debug, info};

use crate::table::{
  dates::parse_query_date,
  filter::filter_indices,
  paginate::page_slice,
  sort::{collate_names, name_collator, sort_indices},
  CellValue, ColumnRoles, PageRequest, Row, SearchQueries, SortDirection, SortKind,
};

/// SQLite collation that orders name columns the way the in-memory sort does.
const NAME_COLLATION: &str = "fleet_names";

/// One page of documents as the server reports it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
  pub rows: Vec<Row>,
  /// Number of records matching the request across all pages.
  pub total: usize,
}

/// A store of documents that can either be read whole or served page by page.
#[async_trait]
pub trait DocumentSource: Send + Sync {
  fn name(&self) -> String;
  async fn count(&self) -> Result<usize>;
  async fn load_all(&self) -> Result<Vec<Row>>;
  async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult>;
}

/// Documents kept in a JSON array on disk. Pages are cut with the same stages the table
/// uses locally, which makes it a stand-in for a paging server.
pub struct JsonSource {
  path: PathBuf,
  rows: Vec<Row>,
  roles: ColumnRoles,
}

impl JsonSource {
  pub async fn open(path: impl AsRef<Path>, roles: ColumnRoles) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let contents =
      tokio::fs::read_to_string(&path).await.wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let rows: Vec<Row> =
      serde_json::from_str(&contents).wrap_err_with(|| format!("{} is not a JSON array of objects", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "loaded JSON documents");
    Ok(Self { path, rows, roles })
  }

  pub fn from_rows(rows: Vec<Row>, roles: ColumnRoles) -> Self {
    Self { path: PathBuf::from("<memory>"), rows, roles }
  }
}

#[async_trait]
impl DocumentSource for JsonSource {
  fn name(&self) -> String {
    self.path.display().to_string()
  }

  async fn count(&self) -> Result<usize> {
    Ok(self.rows.len())
  }

  async fn load_all(&self) -> Result<Vec<Row>> {
    Ok(self.rows.clone())
  }

  async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult> {
    let mut indices = filter_indices(&self.rows, &request.search_queries, None, &self.roles);
    if let Some(column) = request.sort_column.as_deref() {
      sort_indices(&mut indices, &self.rows, column, request.sort_direction, &self.roles);
    }
    let rows = page_slice(&indices, request.page, request.page_size).iter().map(|&i| self.rows[i].clone()).collect();
    Ok(PageResult { rows, total: indices.len() })
  }
}

/// Documents in one SQLite table. Paging, search and sort are pushed into SQL.
pub struct SqliteSource {
  pool: sqlx::SqlitePool,
  table: String,
  columns: Vec<String>,
  roles: ColumnRoles,
}

impl SqliteSource {
  pub async fn open(filename: impl AsRef<Path>, table: &str, roles: ColumnRoles) -> Result<Self> {
    let collator = Mutex::new(name_collator());
    let options = SqliteConnectOptions::new().filename(filename.as_ref()).collation(NAME_COLLATION, move |a, b| {
      match collator.lock() {
        Ok(mut collator) => collate_names(a, b, &mut collator),
        Err(_) => a.to_lowercase().cmp(&b.to_lowercase()),
      }
    });
    let pool = sqlx::SqlitePool::connect_with(options)
      .await
      .map_err(|e| eyre::eyre!("Failed to connect to Sqlite: {}", e))?;

    let tables: Vec<String> =
      sqlx::query_scalar("SELECT name FROM sqlite_schema WHERE type = 'table' AND name NOT LIKE 'sqlite_%'")
        .fetch_all(&pool)
        .await?;
    if !tables.iter().any(|t| t == table) {
      eyre::bail!("No table named {table} (found: {})", tables.join(", "));
    }

    let columns: Vec<String> = sqlx::query(&format!("PRAGMA table_info({})", quote_ident(table)))
      .fetch_all(&pool)
      .await?
      .into_iter()
      .filter_map(|row| row.try_get::<String, _>("name").ok())
      .collect();
    info!(table, columns = columns.len(), "opened SQLite documents");

    Ok(Self { pool, table: table.to_string(), columns, roles })
  }

  pub fn columns(&self) -> &[String] {
    &self.columns
  }

  fn known(&self, column: &str) -> bool {
    self.columns.iter().any(|c| c == column)
  }

  /// `WHERE` clause and its bind values. `None` when a query can never match.
  fn where_clause(&self, search: &SearchQueries) -> Option<(String, Vec<String>)> {
    let mut clauses = vec![];
    let mut binds = vec![];
    for (column, query) in search {
      if query.is_empty() {
        continue;
      }
      if !self.known(column) {
        // Missing fields read as empty text and cannot contain a non-empty query.
        return None;
      }
      if self.roles.is_date_search(column) {
        let day = parse_query_date(query)?;
        clauses.push(format!("date({}) = ?", quote_ident(column)));
        binds.push(day.format("%Y-%m-%d").to_string());
      } else {
        clauses.push(format!("LOWER(CAST({} AS TEXT)) LIKE ? ESCAPE '\\'", quote_ident(column)));
        binds.push(format!("%{}%", escape_like(&query.to_lowercase())));
      }
    }
    let sql = if clauses.is_empty() { String::new() } else { format!(" WHERE {}", clauses.join(" AND ")) };
    Some((sql, binds))
  }

  fn order_clause(&self, request: &PageRequest) -> String {
    let Some(column) = request.sort_column.as_deref().filter(|c| self.known(c)) else {
      return " ORDER BY rowid".to_string();
    };
    let ident = quote_ident(column);
    let key = match self.roles.sort_kind(column) {
      SortKind::Numeric => format!("CAST({ident} AS REAL)"),
      SortKind::Date => format!("COALESCE(julianday({ident}), 2440587.5)"),
      SortKind::Text => format!("CAST({ident} AS TEXT) COLLATE {NAME_COLLATION}"),
      SortKind::Raw => ident,
    };
    let direction = match request.sort_direction {
      SortDirection::Ascending => "ASC",
      SortDirection::Descending => "DESC",
    };
    format!(" ORDER BY {key} {direction}, rowid")
  }
}

#[async_trait]
impl DocumentSource for SqliteSource {
  fn name(&self) -> String {
    self.table.clone()
  }

  async fn count(&self) -> Result<usize> {
    let count: i64 =
      sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", quote_ident(&self.table))).fetch_one(&self.pool).await?;
    Ok(count as usize)
  }

  async fn load_all(&self) -> Result<Vec<Row>> {
    let rows = sqlx::query(&format!("SELECT * FROM {} ORDER BY rowid", quote_ident(&self.table)))
      .fetch_all(&self.pool)
      .await?;
    rows.iter().map(to_row).collect()
  }

  async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult> {
    let Some((where_sql, binds)) = self.where_clause(&request.search_queries) else {
      return Ok(PageResult::default());
    };
    let table = quote_ident(&self.table);

    let count_sql = format!("SELECT COUNT(*) FROM {table}{where_sql}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for bind in &binds {
      count_query = count_query.bind(bind.as_str());
    }
    let total = count_query.fetch_one(&self.pool).await? as usize;

    let page_sql = format!("SELECT * FROM {table}{where_sql}{} LIMIT ? OFFSET ?", self.order_clause(request));
    debug!(sql = %page_sql, "fetching page");
    let offset = request.page.saturating_sub(1).saturating_mul(request.page_size);
    let mut page_query = sqlx::query(&page_sql);
    for bind in &binds {
      page_query = page_query.bind(bind.as_str());
    }
    let rows = page_query.bind(request.page_size as i64).bind(offset as i64).fetch_all(&self.pool).await?;

    Ok(PageResult { rows: rows.iter().map(to_row).collect::<Result<_>>()?, total })
  }
}

fn quote_ident(name: &str) -> String {
  format!("\"{}\"", name.replace('"', "\"\""))
}

fn escape_like(text: &str) -> String {
  text.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn to_row(row: &SqliteRow) -> Result<Row> {
  use sqlx::Column;

  let mut out = Row::new();
  for column in row.columns() {
    out.insert(column.name(), get_sqlite_value(row, column.ordinal())?);
  }
  Ok(out)
}

fn get_sqlite_value(row: &SqliteRow, index: usize) -> Result<CellValue> {
  let raw = row.try_get_raw(index)?;
  if raw.is_null() {
    return Ok(CellValue::Null);
  }
  let value = match raw.type_info().name() {
    "INTEGER" => CellValue::from(row.try_get::<i64, _>(index)?),
    "REAL" | "NUMERIC" => CellValue::from(row.try_get::<f64, _>(index)?),
    "BOOLEAN" => CellValue::from(row.try_get::<bool, _>(index)?),
    "BLOB" => {
      let bytes: Vec<u8> = row.try_get(index)?;
      CellValue::Text(format!("\\x{}", bytes.iter().map(|v| format!("{v:02x}")).collect::<String>()))
    },
    _ => CellValue::Text(row.try_get::<String, _>(index)?),
  };
  Ok(value)
}
