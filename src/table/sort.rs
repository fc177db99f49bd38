use std::cmp::Ordering;

use feruca::{Collator, Tailoring};

use super::{
  dates::epoch_millis,
  models::{CellValue, ColumnRoles, Row, SortDirection, SortKind},
};

/// Stable in-place sort of row indices by one column.
pub fn sort_indices(indices: &mut [usize], rows: &[Row], column: &str, direction: SortDirection, roles: &ColumnRoles) {
  let kind = roles.sort_kind(column);
  let mut collator = name_collator();
  indices.sort_by(|&a, &b| direction.apply(compare(rows[a].get(column), rows[b].get(column), kind, &mut collator)));
}

/// Unicode collation (CLDR root) with punctuation kept significant.
pub fn name_collator() -> Collator {
  Collator::new(Tailoring::default(), false, true)
}

/// Lower-cases both names, then collates them. Names equal after lower-casing are `Equal`.
pub fn collate_names(a: &str, b: &str, collator: &mut Collator) -> Ordering {
  let (a, b) = (a.to_lowercase(), b.to_lowercase());
  if a == b {
    return Ordering::Equal;
  }
  collator.collate(a.as_str(), b.as_str())
}

pub fn compare(a: Option<&CellValue>, b: Option<&CellValue>, kind: SortKind, collator: &mut Collator) -> Ordering {
  match kind {
    SortKind::Numeric => number_or_zero(a).total_cmp(&number_or_zero(b)),
    SortKind::Date => epoch_millis(a).cmp(&epoch_millis(b)),
    SortKind::Text => collate_names(&text_of(a), &text_of(b), collator),
    SortKind::Raw => match (a, b) {
      (Some(a), Some(b)) => a.raw_cmp(b),
      _ => Ordering::Equal,
    },
  }
}

fn number_or_zero(value: Option<&CellValue>) -> f64 {
  value.and_then(CellValue::as_number).filter(|n| !n.is_nan()).unwrap_or(0.0)
}

fn text_of(value: Option<&CellValue>) -> String {
  value.map(|v| v.to_string()).unwrap_or_default()
}
