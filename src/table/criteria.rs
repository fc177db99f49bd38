use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const STATUS_APPROVED: &str = "APPROVED";
pub const STATUS_REJECTED: &str = "REJECTED";
pub const STATUS_PENDING: &str = "PENDING";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub from_date: Option<NaiveDate>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub to_date: Option<NaiveDate>,
}

impl DateRange {
  pub fn is_unbounded(&self) -> bool {
    self.from_date.is_none() && self.to_date.is_none()
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlags {
  #[serde(default)]
  pub approved: bool,
  #[serde(default)]
  pub rejected: bool,
  #[serde(default)]
  pub pending: bool,
}

impl StatusFlags {
  pub fn any(&self) -> bool {
    self.approved || self.rejected || self.pending
  }

  /// Status values selected by the set flags.
  pub fn accepted(&self) -> Vec<&'static str> {
    [(self.approved, STATUS_APPROVED), (self.rejected, STATUS_REJECTED), (self.pending, STATUS_PENDING)]
      .into_iter()
      .filter_map(|(set, status)| set.then_some(status))
      .collect()
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeFlags {
  #[serde(default)]
  pub png: bool,
  #[serde(default)]
  pub jpg: bool,
  #[serde(default)]
  pub pdf: bool,
  #[serde(default)]
  pub doc: bool,
}

impl FileTypeFlags {
  pub fn any(&self) -> bool {
    self.png || self.jpg || self.pdf || self.doc
  }

  /// Mime types selected by the set flags. `jpg` covers both spellings.
  pub fn accepted(&self) -> Vec<&'static str> {
    let mut mimes = Vec::new();
    if self.png {
      mimes.push("image/png");
    }
    if self.jpg {
      mimes.extend(["image/jpeg", "image/jpg"]);
    }
    if self.pdf {
      mimes.push("application/pdf");
    }
    if self.doc {
      mimes.push("application/msword");
    }
    mimes
  }
}

/// Structured filter dimensions. Every dimension is optional; a criteria value with no
/// dimension present is "empty" and is treated differently from one whose dimensions are
/// present but select everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date_range: Option<DateRange>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<StatusFlags>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub file_types: Option<FileTypeFlags>,
}

impl FilterCriteria {
  pub fn is_empty(&self) -> bool {
    self.date_range.is_none() && self.status.is_none() && self.file_types.is_none()
  }

  pub fn status_mut(&mut self) -> &mut StatusFlags {
    self.status.get_or_insert_with(StatusFlags::default)
  }

  pub fn file_types_mut(&mut self) -> &mut FileTypeFlags {
    self.file_types.get_or_insert_with(FileTypeFlags::default)
  }

  pub fn date_range_mut(&mut self) -> &mut DateRange {
    self.date_range.get_or_insert_with(DateRange::default)
  }
}
