//! Member-by-member comparison of two records.
//!
//! Unlike [`diff_changes`](super::diff_changes) this does not descend into
//! members or tolerate float noise: each top-level member is compared
//! exactly and reported whole.

use crate::diff::model::Change;
use crate::errors::{DataShapeError, Result};
use crate::value::{Instance, Record};

static NULL: Instance = Instance::Null;

/// Members whose values differ, in `a`'s declared order
///
/// Members present on only one side compare against `Instance::Null`.
pub fn mismatched_members(a: &Record, b: &Record) -> Vec<Change> {
    let extra = b.members().filter(|(name, _)| !a.contains(name));
    a.members()
        .chain(extra)
        .filter_map(|(name, _)| {
            let left = a.get(name).unwrap_or(&NULL);
            let right = b.get(name).unwrap_or(&NULL);
            (left != right).then(|| Change::new(name, left.clone(), right.clone()))
        })
        .collect()
}

/// Fail unless every member of `a` and `b` matches
///
/// # Errors
///
/// `RecordsDiffer` naming the mismatched members.
pub fn ensure_matched(a: &Record, b: &Record) -> Result<()> {
    let mismatches = mismatched_members(a, b);
    if mismatches.is_empty() {
        return Ok(());
    }
    tracing::debug!(
        type_name = a.type_name(),
        mismatch_count = mismatches.len(),
        "records differ"
    );
    Err(DataShapeError::RecordsDiffer {
        type_name: a.type_name().to_string(),
        members: mismatches.into_iter().map(|c| c.path).collect(),
    })
}
