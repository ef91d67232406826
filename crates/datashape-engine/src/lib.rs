//! Datashape Engine - Operation layer
//!
//! Wraps the core algorithms in operation handlers that own lifecycle
//! logging. Each handler emits exactly one `start` event followed by one
//! `end` or `end_error` event carrying `duration_ms`.

pub mod commands;

pub use commands::compare::{diff_documents, merge_documents};
pub use commands::instance::{
    check_instance, decode_instance, default_instance, describe_schema, load_schema,
};
pub use commands::paths::{find_paths, path_delete, path_get, path_set};
