//! Structured logging facility for datashape
//!
//! One initialization point plus three lifecycle macros:
//! - `init(profile)` installs the subscriber once per process
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` emit the canonical
//!   start/end/end_error events
//! - a capture layer records events in memory for test assertions
//!
//! Lifecycle events are owned by the engine layer. Core modules only emit
//! `tracing::debug!` detail.
//!
//! # Usage
//!
//! ```rust
//! use datashape_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
