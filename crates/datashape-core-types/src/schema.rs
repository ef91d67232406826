//! Canonical schema constants for structured logging and events
//!
//! These constants keep field keys identical across the core, engine and CLI.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Operation context
pub const FIELD_PATH: &str = "path";
pub const FIELD_POLICY: &str = "policy";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

/// Path segment that broadcasts over every element of a sequence.
pub const PATH_WILDCARD: &str = "_";

/// Separator between segments of a dotted path.
pub const PATH_SEPARATOR: char = '.';
