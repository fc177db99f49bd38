use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
  mode::Mode,
  table::{PageRequest, Row},
};

#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
  Tick,
  Render,
  Resize(u16, u16),
  Suspend,
  Resume,
  Quit,
  Refresh,
  Error(String),
  Help,
  LoadDocuments,
  DocumentsLoaded(Vec<Row>, usize),
  FetchPage(PageRequest),
  PageLoaded(PageRequest, Vec<Row>, usize),
  PageChanged(usize),
  NextPage,
  PrevPage,
  FirstPage,
  LastPage,
  RowMoveUp,
  RowMoveDown,
  ColumnLeft,
  ColumnRight,
  StartSearch,
  CycleSortColumn,
  ToggleSortDirection,
  ClearSort,
  ToggleFilterPanel,
  ClearFilters,
  SwitchMode(Mode),
}
