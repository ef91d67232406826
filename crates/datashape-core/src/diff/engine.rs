//! Diff computation.
//!
//! The entry point is [`diff_changes`]; [`diff`] renders its output as
//! strings.

use crate::diff::model::{render_changes, Change};
use crate::value::Instance;
use std::collections::BTreeSet;

/// Relative tolerance used when either side of a numeric pair is a float.
pub const REL_TOLERANCE: f64 = 1e-3;

static NULL: Instance = Instance::Null;

/// Relative closeness with no absolute floor
///
/// `|a - b| <= REL_TOLERANCE * max(|a|, |b|)`
pub fn is_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= REL_TOLERANCE * a.abs().max(b.abs())
}

/// Every difference between `a` and `b`, rooted at `path`
pub fn diff_changes(path: &str, a: &Instance, b: &Instance) -> Vec<Change> {
    let mut changes = Vec::new();
    diff_into(path, a, b, &mut changes);
    tracing::debug!(path, change_count = changes.len(), "diff computed");
    changes
}

/// Differences rendered as `"path: before -> after"`
pub fn diff(path: &str, a: &Instance, b: &Instance) -> Vec<String> {
    render_changes(&diff_changes(path, a, b))
}

fn child_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}

fn integer(value: &Instance) -> Option<i128> {
    match value {
        Instance::Int(n) => Some(i128::from(*n)),
        Instance::UInt(n) => Some(i128::from(*n)),
        _ => None,
    }
}

fn diff_into(path: &str, a: &Instance, b: &Instance, out: &mut Vec<Change>) {
    let equal = match (a, b) {
        (Instance::Null, Instance::Null) => true,
        (Instance::Int(_) | Instance::UInt(_), Instance::Int(_) | Instance::UInt(_)) => {
            integer(a) == integer(b)
        }
        (
            Instance::Int(_) | Instance::UInt(_) | Instance::Float(_),
            Instance::Int(_) | Instance::UInt(_) | Instance::Float(_),
        ) => {
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => is_close(x, y),
                _ => false,
            }
        }
        (Instance::Bool(x), Instance::Bool(y)) => x == y,
        (Instance::Str(x), Instance::Str(y)) => x == y,
        (Instance::Enum(x), Instance::Enum(y)) => x == y,
        (
            Instance::Map(_) | Instance::Record(_),
            Instance::Map(_) | Instance::Record(_),
        ) => {
            diff_members(path, a, b, out);
            true
        }
        (Instance::Seq(xs), Instance::Seq(ys)) => {
            for i in 0..xs.len().max(ys.len()) {
                let x = xs.get(i).unwrap_or(&NULL);
                let y = ys.get(i).unwrap_or(&NULL);
                diff_into(&child_path(path, &i.to_string()), x, y, out);
            }
            true
        }
        _ => false,
    };
    if !equal {
        out.push(Change::new(path, a.clone(), b.clone()));
    }
}

fn entries(node: &Instance) -> Vec<(&str, &Instance)> {
    match node {
        Instance::Map(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        Instance::Record(record) => record.members().collect(),
        _ => Vec::new(),
    }
}

fn lookup<'a>(side: &[(&str, &'a Instance)], key: &str) -> Option<&'a Instance> {
    side.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn diff_members(path: &str, a: &Instance, b: &Instance, out: &mut Vec<Change>) {
    let left = entries(a);
    let right = entries(b);

    let keys: Vec<&str> = if matches!((a, b), (Instance::Map(_), Instance::Map(_))) {
        left.iter()
            .chain(&right)
            .map(|(k, _)| *k)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        let mut keys: Vec<&str> = left.iter().map(|(k, _)| *k).collect();
        for (k, _) in &right {
            if !keys.contains(k) {
                keys.push(*k);
            }
        }
        keys
    };

    for key in keys {
        let x = lookup(&left, key).unwrap_or(&NULL);
        let y = lookup(&right, key).unwrap_or(&NULL);
        diff_into(&child_path(path, key), x, y, out);
    }
}
