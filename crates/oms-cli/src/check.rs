//! # Check Subcommand
//!
//! `oms check <CONTRACT> [FILE]` validates a JSON document and prints the
//! pruned value. On rejection the formatted error goes to stderr, one
//! property per line, and the command reports failure.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use oms_contracts::ContractRegistry;
use oms_shape::{check_and_prune, FormattedError};
use serde_json::Value;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Contract expression, e.g. `invite_member` or `page<member_view>`.
    pub contract: String,

    /// JSON document to check. Reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,

    /// Print the pruned value on a single line.
    #[arg(long)]
    pub compact: bool,
}

/// Result of checking one document.
#[derive(Debug)]
pub enum CheckOutcome {
    Valid(Value),
    Invalid(FormattedError),
}

/// Check `source` against the contract named by `expr`. Empty input is an
/// absent value, which every object contract rejects as required.
pub fn check_source(
    registry: &ContractRegistry,
    expr: &str,
    source: &str,
) -> anyhow::Result<CheckOutcome> {
    let shape = registry.resolve(expr)?;
    let input: Option<Value> = if source.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str(source).context("input is not valid JSON")?)
    };
    Ok(match check_and_prune(&shape, input.as_ref()) {
        Ok(pruned) => CheckOutcome::Valid(pruned),
        Err(err) => CheckOutcome::Invalid(err),
    })
}

/// Run the subcommand. Returns `true` when the document was accepted.
pub fn run_check(
    args: &CheckArgs,
    registry: &ContractRegistry,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<bool> {
    let source = read_source(args.file.as_ref())?;
    tracing::debug!(contract = %args.contract, bytes = source.len(), "checking document");

    match check_source(registry, &args.contract, &source)? {
        CheckOutcome::Valid(pruned) => {
            let rendered = if args.compact {
                serde_json::to_string(&pruned)?
            } else {
                serde_json::to_string_pretty(&pruned)?
            };
            writeln!(out, "{rendered}")?;
            Ok(true)
        }
        CheckOutcome::Invalid(rejection) => {
            writeln!(err, "rejected by {}:", args.contract)?;
            for property in &rejection.errors {
                writeln!(err, "  {}: {}", property.property, property.message)?;
            }
            Ok(false)
        }
    }
}

fn read_source(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}
