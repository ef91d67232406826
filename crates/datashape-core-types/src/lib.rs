//! Core types shared across datashape facilities
//!
//! This crate provides the canonical constants used by both the error and
//! logging facilities, and by the path accessor:
//!
//! - **Schema constants**: canonical field keys and event names
//! - **Path tokens**: the wildcard segment and the segment separator

pub mod schema;

pub use schema::{PATH_SEPARATOR, PATH_WILDCARD};
