//! # Contract Errors

use oms_shape::ShapeError;
use thiserror::Error;

/// Failure to build or look up a contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// No concrete contract is registered under this name.
    #[error("unknown contract '{0}'")]
    UnknownContract(String),

    /// No generic contract is registered under this name.
    #[error("unknown generic contract '{0}'")]
    UnknownGeneric(String),

    /// A contract expression such as `page<member>` is malformed.
    #[error("cannot parse contract expression '{expr}': {reason}")]
    Parse {
        /// The expression as given.
        expr: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A contract declaration is itself defective.
    #[error("contract declaration error: {0}")]
    Shape(#[from] ShapeError),
}
