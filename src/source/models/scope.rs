use std::fmt;

use serde::{Deserialize, Serialize};

/// Which subset of photos a query draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    All,
    Featured,
}

impl Scope {
    pub fn is_featured(self) -> bool {
        matches!(self, Self::Featured)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Featured => f.write_str("featured"),
        }
    }
}
