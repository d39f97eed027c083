//! # oms-contracts — Wire Contracts of the Organization Service
//!
//! The statically declared shapes every request and response of the
//! organization-management service is checked against, plus typed mirrors
//! for handlers to deserialize pruned values into.
//!
//! ## Modules
//!
//! - [`organization`] — tenants: `organization`, `create_organization`,
//!   `organization_summary`, `organization_path`.
//! - [`member`] — memberships: `member`, `member_view`, `invite_member`,
//!   `member_patch`, `member_path`.
//! - [`wrapper`] — generic `page<T>` and `envelope<T>`.
//! - [`registry`] — [`ContractRegistry`], built once at start-up.
//! - [`types`] — serde types matching the contracts.
//!
//! ## Crate Policy
//!
//! - Depends only on `oms-shape` internally.
//! - Renaming a contract field is a wire-protocol change: update the shape
//!   and the typed mirror together.

pub mod error;
pub mod member;
pub mod organization;
pub mod registry;
pub mod types;
pub mod wrapper;

pub use error::ContractError;
pub use registry::{names, ContractRegistry};
