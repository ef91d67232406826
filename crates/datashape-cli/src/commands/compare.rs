//! Compare commands
//!
//! Usage:
//!   datashape merge <A> <B> [--policy zip|replace-all] [--output <FILE>]
//!   datashape diff <A> <B> [--label <LABEL>] [--json]

use super::{read_json, write_json, CommandResult};
use clap::{Args, ValueEnum};
use datashape_core::merge::ListMergePolicy;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Pair sequence elements by index and merge them
    Zip,
    /// Take the right-hand sequence wholesale
    ReplaceAll,
}

impl From<PolicyArg> for ListMergePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Zip => ListMergePolicy::Zip,
            PolicyArg::ReplaceAll => ListMergePolicy::ReplaceAll,
        }
    }
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Base document (JSON)
    pub a: PathBuf,

    /// Document merged over the base (JSON)
    pub b: PathBuf,

    /// How two non-empty sequences combine
    #[arg(long, value_enum, default_value_t = PolicyArg::ReplaceAll)]
    pub policy: PolicyArg,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Left document (JSON)
    pub a: PathBuf,

    /// Right document (JSON)
    pub b: PathBuf,

    /// Prefix for every reported path
    #[arg(short, long, default_value = "")]
    pub label: String,

    /// Print changes as a JSON array of {path, before, after}
    #[arg(long)]
    pub json: bool,
}

/// Execute merge command
pub fn execute_merge(args: MergeArgs) -> CommandResult {
    let a = read_json(&args.a)?;
    let b = read_json(&args.b)?;

    let merged = datashape_engine::merge_documents(&a, &b, args.policy.into())?;

    write_json(&merged, args.output.as_ref())
}

/// Execute diff command
///
/// Exit status is 0 whether or not the documents differ.
pub fn execute_diff(args: DiffArgs) -> CommandResult {
    let a = read_json(&args.a)?;
    let b = read_json(&args.b)?;

    let changes = datashape_engine::diff_documents(&args.label, &a, &b)?;

    if args.json {
        let rendered: Vec<Value> = changes.iter().map(|c| c.to_untyped()).collect();
        return write_json(&Value::Array(rendered), None);
    }
    for change in &changes {
        println!("{}", change);
    }
    Ok(())
}
