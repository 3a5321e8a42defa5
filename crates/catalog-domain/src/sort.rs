//! Sort direction.

use serde::{Deserialize, Serialize};

/// Generic sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    /// Split a `-`-prefixed ordering term into its field name and direction.
    ///
    /// `"price"` is ascending, `"-price"` descending.
    pub fn split_prefixed(term: &str) -> (&str, Self) {
        match term.strip_prefix('-') {
            Some(field) => (field, Self::Desc),
            None => (term, Self::Asc),
        }
    }
}
