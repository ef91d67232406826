//! datashape core - schema-driven data marshalling
//!
//! This crate turns a declarative schema into a runtime type and then works
//! with values of that type:
//! - Shape model specs (`FieldSpec`, `ChoiceSpec`, `GroupSpec`, `ListSpec`) and their JSON document form
//! - Type synthesis into record/enum descriptors plus a flat registry
//! - Default construction, optionally seeded by partial input
//! - Type-directed decoding of untyped data, lenient or strict
//! - Dotted-path get/set/delete and key search
//! - Deep merge with a configurable list policy
//! - Float-tolerant structural diff and exact per-member record comparison
//! - Instance type checking and JSON metadata for type descriptors
//!
//! Every operation is a synchronous function over owned or borrowed trees;
//! the crate holds no global state apart from the logging subscriber.

pub mod decode;
pub mod defaults;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod merge;
pub mod meta;
pub mod path;
pub mod shape;
pub mod synth;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use decode::{decode, decode_shape, DecodeOptions};
pub use defaults::build_default;
pub use diff::{diff, diff_changes, ensure_matched, mismatched_members, Change};
pub use errors::{DataShapeError, ErrorKind, ExError, Result};
pub use merge::{merge, ListMergePolicy};
pub use meta::{record_meta, shape_meta};
pub use path::{delete, find_all_keys, find_key, get, set, Path};
pub use shape::{ChoiceOption, ChoiceSpec, FieldSpec, GroupSpec, ListSpec, NumberFieldSpec, Spec};
pub use synth::{synthesize, Registry, SynthesizedType};
pub use types::{PrimitiveKind, RecordType, TypeShape};
pub use value::{Instance, Record};
