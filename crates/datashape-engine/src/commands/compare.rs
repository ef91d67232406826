//! Merge and diff handlers over untyped documents.

use super::finish;
use datashape_core::diff::{diff_changes, Change};
use datashape_core::errors::Result;
use datashape_core::log_op_start;
use datashape_core::merge::{merge, ListMergePolicy};
use datashape_core::value::Instance;
use serde_json::Value;

/// Deep-merge `b` over `a`
///
/// # Errors
///
/// `Unmergeable` when the documents disagree on the kind of a node.
pub fn merge_documents(a: &Value, b: &Value, policy: ListMergePolicy) -> Result<Value> {
    log_op_start!("merge_documents", policy = policy.name());
    finish("merge_documents", || {
        merge(&Instance::from_untyped(a), &Instance::from_untyped(b), policy)
            .map(|v| v.to_untyped())
    })
}

/// Structural differences between two documents, rooted at `label`
///
/// # Errors
///
/// Never fails today; the signature matches the other handlers.
pub fn diff_documents(label: &str, a: &Value, b: &Value) -> Result<Vec<Change>> {
    log_op_start!("diff_documents", label = label);
    finish("diff_documents", || {
        Ok(diff_changes(
            label,
            &Instance::from_untyped(a),
            &Instance::from_untyped(b),
        ))
    })
}
