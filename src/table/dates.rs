//! Lenient date handling for row timestamps and date inputs.
//!
//! All calendar arithmetic is done in UTC. Nothing here fails: values that do not
//! parse come back as `None` (or `0` for epoch milliseconds).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::models::CellValue;

const DATETIME_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

const QUERY_DATE_FORMATS: [&str; 2] = ["%m-%d-%Y", "%m/%d/%Y"];

pub fn parse_timestamp(value: &CellValue) -> Option<DateTime<Utc>> {
  match value {
    CellValue::Number(ms) if ms.is_finite() => DateTime::from_timestamp_millis(*ms as i64),
    CellValue::Text(s) => parse_timestamp_str(s),
    _ => None,
  }
}

pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc));
  }
  for format in DATETIME_FORMATS {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
      return Some(naive.and_utc());
    }
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)).map(|d| d.and_utc())
}

/// Epoch milliseconds, `0` when the value is not a readable timestamp.
pub fn epoch_millis(value: Option<&CellValue>) -> i64 {
  value.and_then(parse_timestamp).map(|dt| dt.timestamp_millis()).unwrap_or(0)
}

/// Parses a date typed by a user as `MM-DD-YYYY` or `MM/DD/YYYY`.
pub fn parse_query_date(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  QUERY_DATE_FORMATS.iter().find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

pub fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
  date.and_hms_opt(0, 0, 0).map(|d| d.and_utc())
}

pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
  date.and_hms_milli_opt(23, 59, 59, 999).map(|d| d.and_utc())
}

pub fn format_query_date(date: NaiveDate) -> String {
  date.format("%m-%d-%Y").to_string()
}
