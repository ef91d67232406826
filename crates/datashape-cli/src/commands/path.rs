//! Path commands
//!
//! Usage:
//!   datashape get <DOC> <PATH>
//!   datashape set <DOC> <PATH> <VALUE> [--create-missing] [--output <FILE>]
//!   datashape delete <DOC> <PATH> [--output <FILE>]
//!   datashape find <DOC> <KEY> [--all]

use super::{read_json, write_json, CommandResult};
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Document (JSON)
    pub doc: PathBuf,

    /// Dotted path; `_` maps over every sequence element
    pub path: String,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Document (JSON)
    pub doc: PathBuf,

    /// Dotted path
    pub path: String,

    /// Value as JSON text; anything that is not valid JSON is taken as a string
    pub value: String,

    /// Create absent intermediate maps and sequences
    #[arg(long)]
    pub create_missing: bool,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Document (JSON)
    pub doc: PathBuf,

    /// Dotted path
    pub path: String,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Document (JSON)
    pub doc: PathBuf,

    /// Key to search for
    pub key: String,

    /// Report every occurrence instead of the first
    #[arg(long)]
    pub all: bool,
}

fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Execute get command
pub fn execute_get(args: GetArgs) -> CommandResult {
    let doc = read_json(&args.doc)?;
    let value = datashape_engine::path_get(&doc, &args.path)?;
    write_json(&value, None)
}

/// Execute set command
pub fn execute_set(args: SetArgs) -> CommandResult {
    let doc = read_json(&args.doc)?;
    let value = parse_value(&args.value);

    let updated = datashape_engine::path_set(&doc, &args.path, &value, args.create_missing)?;

    write_json(&updated, args.output.as_ref())
}

/// Execute delete command
pub fn execute_delete(args: DeleteArgs) -> CommandResult {
    let doc = read_json(&args.doc)?;
    let updated = datashape_engine::path_delete(&doc, &args.path)?;
    write_json(&updated, args.output.as_ref())
}

/// Execute find command
///
/// Prints one path per line; prints nothing when the key is absent.
pub fn execute_find(args: FindArgs) -> CommandResult {
    let doc = read_json(&args.doc)?;
    for path in datashape_engine::find_paths(&doc, &args.key, args.all)? {
        println!("{}", path);
    }
    Ok(())
}
