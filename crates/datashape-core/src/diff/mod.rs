//! Structural diff between two instances.
//!
//! ## Entry points
//!
//! ```
//! use datashape_core::diff::diff;
//! use datashape_core::value::Instance;
//! use serde_json::json;
//!
//! let a = Instance::from_untyped(&json!({"hello": {"world": 1}}));
//! let b = Instance::from_untyped(&json!({"hello": {"world": 2}}));
//! assert_eq!(diff("fieldex", &a, &b), vec!["fieldex.hello.world: 1 -> 2"]);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: map keys are visited in ascending order, record members
//!   in declared order, sequence elements by index.
//! - **Float tolerance**: numbers compare with a relative tolerance of 1e-3
//!   whenever either side is a float.
//! - **Infallible**: differences are data, never errors. Kinds that cannot
//!   be compared structurally are reported as a single leaf change.
//!
//! [`mismatched_members`] and [`ensure_matched`] give the shallow, exact
//! per-member view of two records.

pub mod engine;
pub mod members;
pub mod model;

pub use engine::{diff, diff_changes, is_close, REL_TOLERANCE};
pub use members::{ensure_matched, mismatched_members};
pub use model::Change;
