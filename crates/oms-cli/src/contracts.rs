//! # Contracts Subcommand
//!
//! Lists the registry: concrete contracts first, then generic constructors
//! with their arity.

use std::io::Write;

use clap::Args;
use oms_contracts::ContractRegistry;
use serde_json::json;

/// Arguments for the contracts subcommand.
#[derive(Args, Debug)]
pub struct ContractsArgs {
    /// Emit a JSON object instead of plain lines.
    #[arg(long)]
    pub json: bool,
}

pub fn run_contracts(
    args: &ContractsArgs,
    registry: &ContractRegistry,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if args.json {
        let generics: Vec<_> = registry
            .generic_names()
            .map(|(name, arity)| json!({"name": name, "arity": arity}))
            .collect();
        let listing = json!({
            "contracts": registry.contract_names().collect::<Vec<_>>(),
            "generics": generics,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&listing)?)?;
        return Ok(());
    }

    for name in registry.contract_names() {
        writeln!(out, "{name}")?;
    }
    for (name, arity) in registry.generic_names() {
        writeln!(out, "{name}/{arity}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_listing_ends_with_generics() {
        let registry = ContractRegistry::new().unwrap();
        let mut out = Vec::new();
        run_contracts(&ContractsArgs { json: false }, &registry, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines.contains(&"invite_member"));
        assert!(lines.contains(&"page<member_view>"));
        assert_eq!(lines[lines.len() - 2..], ["envelope/1", "page/1"]);
    }

    #[test]
    fn json_listing_parses() {
        let registry = ContractRegistry::new().unwrap();
        let mut out = Vec::new();
        run_contracts(&ContractsArgs { json: true }, &registry, &mut out).unwrap();
        let listing: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(listing["generics"][0], json!({"name": "envelope", "arity": 1}));
        assert!(listing["contracts"]
            .as_array()
            .unwrap()
            .contains(&json!("member_path")));
    }
}
