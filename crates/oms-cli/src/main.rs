//! # oms CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;
use oms_contracts::ContractRegistry;

/// Organization service contract toolchain.
///
/// Checks JSON documents against the service's wire contracts and lists the
/// contract registry.
#[derive(Parser, Debug)]
#[command(name = "oms", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate and prune a JSON document against a contract.
    Check(oms_cli::check::CheckArgs),
    /// List registered contracts.
    Contracts(oms_cli::contracts::ContractsArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = ContractRegistry::new()?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Check(args) => {
            let mut stderr = std::io::stderr().lock();
            let accepted = oms_cli::check::run_check(&args, &registry, &mut stdout, &mut stderr)?;
            Ok(if accepted {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Contracts(args) => {
            oms_cli::contracts::run_contracts(&args, &registry, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
