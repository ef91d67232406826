//! Diff output types.

use crate::value::Instance;
use serde_json::{json, Value};
use std::fmt;

/// One path-qualified difference
///
/// `before` or `after` is `Instance::Null` when the value only exists on one
/// side.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub path: String,
    pub before: Instance,
    pub after: Instance,
}

impl Change {
    pub fn new(path: impl Into<String>, before: Instance, after: Instance) -> Self {
        Self {
            path: path.into(),
            before,
            after,
        }
    }

    /// Untyped rendering: `{"path": .., "before": .., "after": ..}`
    pub fn to_untyped(&self) -> Value {
        json!({
            "path": self.path,
            "before": self.before.to_untyped(),
            "after": self.after.to_untyped(),
        })
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.path, self.before, self.after)
    }
}

/// Render changes as `"path: before -> after"` lines
pub fn render_changes(changes: &[Change]) -> Vec<String> {
    changes.iter().map(Change::to_string).collect()
}
