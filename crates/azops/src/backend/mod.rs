//! Backend abstraction for operation catalog lookups.
//!
//! The [`Backend`] trait defines how a provider namespace's operation
//! catalog is obtained, allowing for different implementations (real Azure
//! CLI, canned catalogs for testing).

pub mod az;

use crate::catalog::OperationCatalog;
use crate::error::Result;

/// Backend trait for catalog lookups.
pub trait Backend: Send + Sync {
    /// Fetch the operation catalog of a provider namespace
    /// (e.g. `Microsoft.Storage`).
    fn provider_operations(&self, namespace: &str) -> Result<OperationCatalog>;
}

