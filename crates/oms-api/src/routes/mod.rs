//! # API Route Modules
//!
//! - `organizations` — tenant creation, listing and lookup.
//! - `members` — invitations, membership listing and updates, scoped to an
//!   organization.
//! - `contracts` — dry-run checks of arbitrary payloads against any
//!   registered contract or generic instantiation.
//!
//! Every handler follows the same flow: prune path parameters and body
//! through their contracts, act on the typed result, then pass the response
//! through its response contract.

pub mod contracts;
pub mod members;
pub mod organizations;
