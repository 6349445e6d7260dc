//! Registry module - read-only access to the HCP Terraform private module registry.
//!
//! - `client` - request construction and the single GET per call
//! - `models` - projection of JSON:API documents into flat records
//! - `error` - failure taxonomy of a call

pub mod client;
pub mod error;
pub mod models;

pub use client::{
    search_params, RegistryClient, DEFAULT_REGISTRY_NAME, DEFAULT_SEARCH_LIMIT, DEFAULT_TIMEOUT,
};
pub use error::RegistryError;
pub use models::{ErrorRecord, ModuleDetail, ModuleSummary, ERROR_PREFIX};
