//! # Application State
//!
//! Shared state for the Axum application: the contract registry built at
//! start-up, the tenant store, and configuration. Cloning is cheap; every
//! field is behind an `Arc`.

use std::sync::Arc;

use oms_contracts::{ContractError, ContractRegistry};

use crate::config::AppConfig;
use crate::store::TenantStore;

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub contracts: Arc<ContractRegistry>,
    pub store: Arc<TenantStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state with default configuration.
    pub fn new() -> Result<Self, ContractError> {
        Self::with_config(AppConfig::default())
    }

    /// Build state, constructing every contract once.
    pub fn with_config(config: AppConfig) -> Result<Self, ContractError> {
        Ok(Self {
            contracts: Arc::new(ContractRegistry::new()?),
            store: Arc::new(TenantStore::new()),
            config: Arc::new(config),
        })
    }
}
