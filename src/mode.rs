use serde::{Deserialize, Serialize};

/// Key-binding layer that is active. The lowercase aliases accept keys read back through
/// the `config` crate, which folds them to lowercase.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
  #[default]
  #[serde(alias = "home")]
  Home,
  /// Typing into a column search box.
  #[serde(alias = "search")]
  Search,
  /// The filter panel is open.
  #[serde(alias = "filter")]
  Filter,
}
