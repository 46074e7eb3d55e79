//! Serializable view of an [`Opts`](crate::Opts) state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The enabled set at one point in time.
///
/// `enabled` is a set: its iteration order, and the element order of its
/// serialized form, are unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptsSnapshot {
    pub enabled: HashSet<String>,
    pub all_off: bool,
    pub coherent: bool,
}

impl OptsSnapshot {
    /// Enabled names in lexical order, for display.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.enabled.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
