//! Path handlers over untyped documents.
//!
//! Documents are converted to instances on the way in and unpacked on the
//! way out, so these handlers never see enumeration members.

use super::finish;
use datashape_core::errors::Result;
use datashape_core::log_op_start;
use datashape_core::path::{delete, find_all_keys, find_key, get, set};
use datashape_core::value::Instance;
use serde_json::Value;

/// Read the value at `path`
///
/// # Errors
///
/// Path errors from [`datashape_core::path::get`].
pub fn path_get(doc: &Value, path: &str) -> Result<Value> {
    log_op_start!("path_get", path = path);
    finish("path_get", || {
        get(&Instance::from_untyped(doc), path).map(|v| v.to_untyped())
    })
}

/// Write `value` at `path` and return the updated document
///
/// # Errors
///
/// Path errors from [`datashape_core::path::set`].
pub fn path_set(doc: &Value, path: &str, value: &Value, create_missing: bool) -> Result<Value> {
    log_op_start!("path_set", path = path, create_missing = create_missing);
    finish("path_set", || {
        set(
            Instance::from_untyped(doc),
            path,
            Instance::from_untyped(value),
            create_missing,
        )
        .map(|v| v.to_untyped())
    })
}

/// Remove the value at `path` and return the updated document
///
/// # Errors
///
/// Path errors from [`datashape_core::path::delete`].
pub fn path_delete(doc: &Value, path: &str) -> Result<Value> {
    log_op_start!("path_delete", path = path);
    finish("path_delete", || {
        delete(Instance::from_untyped(doc), path).map(|v| v.to_untyped())
    })
}

/// Dotted paths at which `key` occurs
///
/// With `all` unset, at most the first occurrence is returned.
///
/// # Errors
///
/// Never fails today; the signature matches the other handlers.
pub fn find_paths(doc: &Value, key: &str, all: bool) -> Result<Vec<String>> {
    log_op_start!("find_paths", key = key, all = all);
    finish("find_paths", || {
        let root = Instance::from_untyped(doc);
        Ok(if all {
            find_all_keys(&root, key)
        } else {
            find_key(&root, key).into_iter().collect()
        })
    })
}
