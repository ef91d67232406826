//! Operation handlers.
//!
//! Schema-driven handlers live in [`instance`], untyped document
//! addressing in [`paths`], and merge/diff in [`compare`].

pub mod compare;
pub mod instance;
pub mod paths;

use datashape_core::errors::Result;
use datashape_core::{log_op_end, log_op_error};
use std::time::Instant;

/// Run `f` and emit the terminal lifecycle event for `op`
///
/// The caller logs `start` itself so it can attach operation-specific
/// fields.
pub(crate) fn finish<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    let result = f();
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => log_op_end!(op, duration_ms = duration_ms),
        Err(e) => log_op_error!(op, e.clone(), duration_ms = duration_ms),
    }
    result
}
