use std::fmt;

use serde::{Deserialize, Serialize};

/// Text a missing identifier normalizes to.
///
/// Both sides of the join use the same sentinel, so a ligand without an
/// identifier matches every pharmacology row without one.
pub const MISSING_KEY: &str = "nan";

/// Normalized registry identifier used for equality during joins.
///
/// Equality is exact and case-sensitive after trimming. Registry number
/// formatting (hyphens, leading zeros) is not normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinKey(String);

impl JoinKey {
    /// Normalize a raw identifier. `None` becomes [`MISSING_KEY`].
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(value) => Self(value.trim().to_string()),
            None => Self(MISSING_KEY.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when this key came from a missing identifier (or the literal text `nan`).
    pub fn is_missing_sentinel(&self) -> bool {
        self.0 == MISSING_KEY
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
