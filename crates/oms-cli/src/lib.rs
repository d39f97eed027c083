//! # oms-cli — Contract Command-Line Interface
//!
//! Operator tooling around the contract registry: check a JSON document
//! against a contract before sending it, and list what the service speaks.
//!
//! ## Subcommands
//!
//! - `check` — validate and prune a document against a contract expression
//! - `contracts` — list registered contracts and generic constructors
//!
//! ## Crate Policy
//!
//! - Argument parsing lives next to each handler; `main` only dispatches.
//! - Handlers write to caller-supplied writers so they can be tested
//!   without a process.

pub mod check;
pub mod contracts;
