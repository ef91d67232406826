//! Deep merge of two instances of matching shape; the right side wins scalar conflicts

use crate::errors::{DataShapeError, Result};
use crate::value::{Instance, Record};
use std::collections::BTreeMap;
use std::fmt;

static NULL: Instance = Instance::Null;

/// How two non-empty sequences combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMergePolicy {
    /// The right-hand sequence replaces the left wholesale
    #[default]
    ReplaceAll,
    /// Elements are paired by index and merged recursively
    ///
    /// Sequences holding scalars are truncated to the shorter length;
    /// sequences of containers run to the longer length and keep the
    /// unpaired elements.
    Zip,
}

impl ListMergePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            ListMergePolicy::ReplaceAll => "replace_all",
            ListMergePolicy::Zip => "zip",
        }
    }
}

impl fmt::Display for ListMergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Merge `b` over `a`
///
/// Both inputs are left untouched; the result is a fresh tree.
///
/// # Errors
///
/// `Unmergeable` for records of different types or any pairing of kinds
/// other than scalar/scalar, record/record, map/map and seq/seq.
pub fn merge(a: &Instance, b: &Instance, policy: ListMergePolicy) -> Result<Instance> {
    merge_at("", a, b, policy)
}

fn child_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}

fn unmergeable(path: &str, left: &str, right: &str) -> DataShapeError {
    tracing::debug!(path, left, right, "unmergeable pair");
    DataShapeError::Unmergeable {
        path: path.to_string(),
        left: left.to_string(),
        right: right.to_string(),
    }
}

fn merge_at(path: &str, a: &Instance, b: &Instance, policy: ListMergePolicy) -> Result<Instance> {
    match (a, b) {
        (Instance::Null, _) => Ok(b.clone()),
        (_, Instance::Null) => Ok(a.clone()),
        (x, y) if x.is_scalar() && y.is_scalar() => Ok(b.clone()),
        (Instance::Record(ra), Instance::Record(rb)) => merge_records(path, ra, rb, policy),
        (Instance::Map(ma), Instance::Map(mb)) => {
            let mut out = BTreeMap::new();
            for key in ma.keys().chain(mb.keys()) {
                if out.contains_key(key) {
                    continue;
                }
                let va = ma.get(key).unwrap_or(&NULL);
                let vb = mb.get(key).unwrap_or(&NULL);
                out.insert(key.clone(), merge_at(&child_path(path, key), va, vb, policy)?);
            }
            Ok(Instance::Map(out))
        }
        (Instance::Seq(sa), Instance::Seq(sb)) => merge_seqs(path, sa, sb, policy),
        _ => Err(unmergeable(path, a.kind_name(), b.kind_name())),
    }
}

fn merge_records(
    path: &str,
    a: &Record,
    b: &Record,
    policy: ListMergePolicy,
) -> Result<Instance> {
    if a.type_name() != b.type_name() {
        return Err(unmergeable(path, a.type_name(), b.type_name()));
    }
    let members = a
        .members()
        .map(|(name, va)| {
            let vb = b.get(name).unwrap_or(&NULL);
            Ok((name.to_string(), merge_at(&child_path(path, name), va, vb, policy)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Instance::Record(Record::new(a.type_name(), members)))
}

fn merge_seqs(
    path: &str,
    a: &[Instance],
    b: &[Instance],
    policy: ListMergePolicy,
) -> Result<Instance> {
    if a.is_empty() {
        return Ok(Instance::Seq(b.to_vec()));
    }
    if b.is_empty() {
        return Ok(Instance::Seq(a.to_vec()));
    }
    match policy {
        ListMergePolicy::ReplaceAll => Ok(Instance::Seq(b.to_vec())),
        ListMergePolicy::Zip => {
            let scalar_elements = a.iter().chain(b).any(Instance::is_scalar);
            let len = if scalar_elements {
                a.len().min(b.len())
            } else {
                a.len().max(b.len())
            };
            (0..len)
                .map(|i| {
                    let ea = a.get(i).unwrap_or(&NULL);
                    let eb = b.get(i).unwrap_or(&NULL);
                    merge_at(&child_path(path, &i.to_string()), ea, eb, policy)
                })
                .collect::<Result<Vec<_>>>()
                .map(Instance::Seq)
        }
    }
}
