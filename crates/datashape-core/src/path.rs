//! Dotted-path access over instances
//!
//! Segments resolve according to the container they land on: a sequence
//! takes a numeric index, a map takes a key (absent keys read as `Null`) and
//! a record takes a member name. The wildcard segment `_` broadcasts a read
//! over every element of a sequence; as the last segment it yields the
//! current value whatever its kind.
//!
//! `set` and `delete` take the root by value and hand back the updated
//! root. On error the consumed root is dropped, so clone first if it must
//! survive a failed write.

use crate::errors::{DataShapeError, Result};
use crate::value::Instance;
use datashape_core_types::{PATH_SEPARATOR, PATH_WILDCARD};
use std::collections::BTreeMap;
use std::fmt;

/// An ordered list of path segments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Split a dotted string; the empty string is the root path
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::default();
        }
        Self {
            segments: dotted.split(PATH_SEPARATOR).map(str::to_string).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(|s| s == PATH_WILDCARD)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(&PATH_SEPARATOR.to_string()))
    }
}

impl From<&str> for Path {
    fn from(dotted: &str) -> Self {
        Path::parse(dotted)
    }
}

impl From<String> for Path {
    fn from(dotted: String) -> Self {
        Path::parse(&dotted)
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path { segments }
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Path::from_segments(segments.iter().copied())
    }
}

fn parse_index(segment: &str, path: &Path) -> Result<usize> {
    segment
        .parse::<usize>()
        .map_err(|_| DataShapeError::InvalidIndex {
            path: path.to_string(),
            segment: segment.to_string(),
        })
}

/// Most `Null` slots a single write may pad onto the end of a sequence
pub const MAX_PADDING: usize = 1 << 16;

/// Make `index` addressable, padding with `Null` up to and including it
fn grow_to(items: &mut Vec<Instance>, index: usize, path: &Path) -> Result<()> {
    if index < items.len() {
        return Ok(());
    }
    if index - items.len() >= MAX_PADDING {
        return Err(DataShapeError::IndexOutOfRange {
            path: path.to_string(),
            index,
            len: items.len(),
        });
    }
    items.resize(index + 1, Instance::Null);
    Ok(())
}

fn is_index(segment: &str) -> bool {
    segment.parse::<usize>().is_ok()
}

fn not_found(path: &Path, segment: &str, found: &str) -> DataShapeError {
    DataShapeError::PathNotFound {
        path: path.to_string(),
        segment: segment.to_string(),
        found: found.to_string(),
    }
}

// ===== get =====

/// Read the value at `path`
///
/// # Errors
///
/// `PathNotFound` when a segment lands on a scalar or null, `InvalidIndex`
/// and `IndexOutOfRange` for bad sequence segments, `UnknownMember` for
/// undeclared record members.
pub fn get(root: &Instance, path: impl Into<Path>) -> Result<Instance> {
    let path = path.into();
    get_in(root, path.segments(), &path)
}

fn get_in(node: &Instance, segments: &[String], path: &Path) -> Result<Instance> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(node.clone());
    };

    if segment == PATH_WILDCARD {
        return match node {
            _ if rest.is_empty() => Ok(node.clone()),
            Instance::Seq(items) => items
                .iter()
                .map(|item| get_in(item, rest, path))
                .collect::<Result<Vec<_>>>()
                .map(Instance::Seq),
            other => Err(not_found(path, segment, other.kind_name())),
        };
    }

    match step(node, segment, path)? {
        Some(child) => get_in(child, rest, path),
        None => get_in(&Instance::Null, rest, path),
    }
}

/// One resolution step; `Ok(None)` is an absent map key
fn step<'a>(node: &'a Instance, segment: &str, path: &Path) -> Result<Option<&'a Instance>> {
    match node {
        Instance::Seq(items) => {
            let index = parse_index(segment, path)?;
            items
                .get(index)
                .map(Some)
                .ok_or_else(|| DataShapeError::IndexOutOfRange {
                    path: path.to_string(),
                    index,
                    len: items.len(),
                })
        }
        Instance::Map(map) => Ok(map.get(segment)),
        Instance::Record(record) => {
            record
                .get(segment)
                .map(Some)
                .ok_or_else(|| DataShapeError::UnknownMember {
                    type_name: record.type_name().to_string(),
                    member: segment.to_string(),
                })
        }
        other => Err(not_found(path, segment, other.kind_name())),
    }
}

// ===== set =====

/// Write `value` at `path` and return the updated root
///
/// With `create_missing`, absent or null intermediates become an empty map,
/// or an empty sequence when the following segment is numeric. Writing past
/// the end of a sequence pads it with `Null`, up to [`MAX_PADDING`] slots.
///
/// # Errors
///
/// `WildcardNotAllowed` for `_` segments. `IndexOutOfRange` when a write
/// would pad more than [`MAX_PADDING`] slots. `PathNotFound` for a missing
/// intermediate without `create_missing`. `UnknownMember` for undeclared
/// record members. `NotAContainer` when the final parent is a scalar.
pub fn set(
    root: Instance,
    path: impl Into<Path>,
    value: Instance,
    create_missing: bool,
) -> Result<Instance> {
    let path = path.into();
    if path.has_wildcard() {
        return Err(DataShapeError::WildcardNotAllowed {
            path: path.to_string(),
        });
    }
    if path.is_empty() {
        return Ok(value);
    }
    let mut root = root;
    set_in(&mut root, path.segments(), &path, value, create_missing)?;
    Ok(root)
}

fn empty_container_for(segment: &str) -> Instance {
    if is_index(segment) {
        Instance::Seq(Vec::new())
    } else {
        Instance::Map(BTreeMap::new())
    }
}

fn set_in(
    node: &mut Instance,
    segments: &[String],
    path: &Path,
    value: Instance,
    create_missing: bool,
) -> Result<()> {
    let Some((segment, rest)) = segments.split_first() else {
        *node = value;
        return Ok(());
    };
    if rest.is_empty() {
        return assign(node, segment, value, path);
    }

    let child = match node {
        Instance::Seq(items) => {
            let index = parse_index(segment, path)?;
            if index >= items.len() {
                if !create_missing {
                    return Err(DataShapeError::IndexOutOfRange {
                        path: path.to_string(),
                        index,
                        len: items.len(),
                    });
                }
                grow_to(items, index, path)?;
            }
            &mut items[index]
        }
        Instance::Map(map) => {
            if !create_missing && !map.contains_key(segment) {
                return Err(not_found(path, segment, "missing"));
            }
            map.entry(segment.clone()).or_insert(Instance::Null)
        }
        Instance::Record(record) => {
            let type_name = record.type_name().to_string();
            record
                .get_mut(segment)
                .ok_or_else(|| DataShapeError::UnknownMember {
                    type_name,
                    member: segment.to_string(),
                })?
        }
        other => return Err(not_found(path, segment, other.kind_name())),
    };

    if child.is_null() {
        if !create_missing {
            return Err(not_found(path, segment, "null"));
        }
        if let Some(next) = rest.first() {
            *child = empty_container_for(next);
        }
    }
    set_in(child, rest, path, value, create_missing)
}

fn assign(node: &mut Instance, segment: &str, value: Instance, path: &Path) -> Result<()> {
    match node {
        Instance::Seq(items) => {
            let index = parse_index(segment, path)?;
            grow_to(items, index, path)?;
            items[index] = value;
            Ok(())
        }
        Instance::Map(map) => {
            map.insert(segment.to_string(), value);
            Ok(())
        }
        Instance::Record(record) => {
            let type_name = record.type_name().to_string();
            let slot = record
                .get_mut(segment)
                .ok_or_else(|| DataShapeError::UnknownMember {
                    type_name,
                    member: segment.to_string(),
                })?;
            *slot = value;
            Ok(())
        }
        other => Err(DataShapeError::NotAContainer {
            path: path.to_string(),
            segment: segment.to_string(),
            found: other.kind_name().to_string(),
        }),
    }
}

// ===== delete =====

/// Remove the value at `path` and return the updated root
///
/// Sequences drop the element, maps drop the key and records reset the
/// member to `Null`. An absent intermediate container makes this a no-op.
///
/// # Errors
///
/// `WildcardNotAllowed` for `_` segments, `IndexOutOfRange` for a final
/// index past the end, `UnknownMember` for undeclared record members and
/// `NotAContainer` when the final parent is a scalar.
pub fn delete(root: Instance, path: impl Into<Path>) -> Result<Instance> {
    let path = path.into();
    if path.has_wildcard() {
        return Err(DataShapeError::WildcardNotAllowed {
            path: path.to_string(),
        });
    }
    if path.is_empty() {
        return Ok(Instance::Null);
    }
    let mut root = root;
    delete_in(&mut root, path.segments(), &path)?;
    Ok(root)
}

fn delete_in(node: &mut Instance, segments: &[String], path: &Path) -> Result<()> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(());
    };

    if rest.is_empty() {
        return match node {
            Instance::Seq(items) => {
                let index = parse_index(segment, path)?;
                if index >= items.len() {
                    return Err(DataShapeError::IndexOutOfRange {
                        path: path.to_string(),
                        index,
                        len: items.len(),
                    });
                }
                items.remove(index);
                Ok(())
            }
            Instance::Map(map) => {
                map.remove(segment);
                Ok(())
            }
            Instance::Record(record) => {
                let type_name = record.type_name().to_string();
                let slot = record
                    .get_mut(segment)
                    .ok_or_else(|| DataShapeError::UnknownMember {
                        type_name,
                        member: segment.to_string(),
                    })?;
                *slot = Instance::Null;
                Ok(())
            }
            Instance::Null => Ok(()),
            other => Err(DataShapeError::NotAContainer {
                path: path.to_string(),
                segment: segment.to_string(),
                found: other.kind_name().to_string(),
            }),
        };
    }

    let child = match node {
        Instance::Seq(items) => {
            let index = parse_index(segment, path)?;
            match items.get_mut(index) {
                Some(child) => child,
                None => return Ok(()),
            }
        }
        Instance::Map(map) => match map.get_mut(segment) {
            Some(child) => child,
            None => return Ok(()),
        },
        Instance::Record(record) => {
            let type_name = record.type_name().to_string();
            record
                .get_mut(segment)
                .ok_or_else(|| DataShapeError::UnknownMember {
                    type_name,
                    member: segment.to_string(),
                })?
        }
        _ => return Ok(()),
    };
    delete_in(child, rest, path)
}

// ===== search =====

/// Dotted path of the first occurrence of `key`, depth-first
pub fn find_key(root: &Instance, key: &str) -> Option<String> {
    let mut found = Vec::new();
    walk_keys(root, key, &mut Vec::new(), &mut found, true);
    found.into_iter().next()
}

/// Dotted paths of every occurrence of `key`, in document order
///
/// Map keys are visited in ascending order, record members in declared
/// order and sequence elements by index. A match is reported before its
/// own children are searched.
pub fn find_all_keys(root: &Instance, key: &str) -> Vec<String> {
    let mut found = Vec::new();
    walk_keys(root, key, &mut Vec::new(), &mut found, false);
    found
}

/// Returns true once the search should stop
fn walk_keys(
    node: &Instance,
    key: &str,
    prefix: &mut Vec<String>,
    found: &mut Vec<String>,
    first_only: bool,
) -> bool {
    let entries: Vec<(String, &Instance)> = match node {
        Instance::Map(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Instance::Record(record) => record.members().map(|(k, v)| (k.to_string(), v)).collect(),
        Instance::Seq(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => return false,
    };
    let keyed = !matches!(node, Instance::Seq(_));

    for (name, child) in entries {
        prefix.push(name);
        if keyed && prefix.last().map(String::as_str) == Some(key) {
            found.push(Path::from(prefix.clone()).to_string());
            if first_only {
                return true;
            }
        }
        let stop = walk_keys(child, key, prefix, found, first_only);
        prefix.pop();
        if stop {
            return true;
        }
    }
    false
}
