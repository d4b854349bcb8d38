//! # azops
//!
//! Pure Rust library for resolving the Azure RBAC operations (`actions` and
//! `dataActions`) that apply to a set of resource types.
//!
//! This crate provides functionality for:
//! - Extracting resource types from AzAPI blocks in Terraform files
//! - Fetching provider operation catalogs through the Azure CLI
//! - Matching catalog operations to resource types
//!
//! ## Example
//!
//! ```no_run
//! use azops::Resolver;
//! use azops::terraform::Extractor;
//! use std::path::Path;
//!
//! let types = Extractor::default()
//!     .extract_file(Path::new("main.tf"))
//!     .expect("Failed to parse");
//!
//! let mut resolver = Resolver::new().expect("Azure CLI not available");
//! let report = resolver.resolve_all(&types).expect("Lookup failed");
//! println!("{}", report.to_json_pretty().unwrap());
//! ```
//!
//! ## Caching
//!
//! A [`Resolver`] fetches each provider namespace's catalog at most once.
//! The cache lives as long as the resolver; nothing is persisted.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod catalog;
pub mod error;
pub mod matcher;
pub mod terraform;
pub mod types;

pub use catalog::{Operation, OperationCatalog, ResourceTypeEntry};
pub use error::{Error, ErrorCategory, Result};
pub use types::{Report, ResolvedOperations, ResourceType};

use backend::{Backend, az::AzBackend};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Resolves resource types to their operations.
///
/// Owns a backend and a per-namespace catalog cache.
pub struct Resolver {
    backend: Box<dyn Backend>,
    cache: HashMap<String, OperationCatalog>,
}

impl Resolver {
    /// Create a new Resolver with the default backend.
    ///
    /// Returns an error if the Azure CLI is not installed.
    pub fn new() -> Result<Self> {
        let backend = AzBackend::new()?;
        Ok(Self::with_backend(Box::new(backend)))
    }

    /// Create a resolver with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            cache: HashMap::new(),
        }
    }

    /// Get the catalog for a namespace, fetching it on first use.
    pub fn catalog(&mut self, namespace: &str) -> Result<&OperationCatalog> {
        let catalog: &OperationCatalog = match self.cache.entry(namespace.to_string()) {
            Entry::Occupied(entry) => {
                log::debug!("Catalog cache hit: {namespace}");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                log::debug!("Catalog cache miss: {namespace}");
                let catalog = self.backend.provider_operations(namespace)?;
                log::debug!("Fetched {} operation(s) for {namespace}", catalog.len());
                entry.insert(catalog)
            }
        };
        Ok(catalog)
    }

    /// Number of namespaces fetched so far.
    pub fn cached_namespaces(&self) -> usize {
        self.cache.len()
    }

    /// Resolve one raw resource type (e.g. `Microsoft.Storage/storageAccounts@2023-01-01`).
    ///
    /// Returns `Ok(None)` for strings without a provider namespace; no
    /// lookup happens for those.
    pub fn resolve(&mut self, raw: &str) -> Result<Option<ResolvedOperations>> {
        let Some(resource_type) = ResourceType::parse(raw) else {
            log::debug!("Skipping {raw:?}: no provider namespace");
            return Ok(None);
        };

        let catalog = self.catalog(resource_type.namespace())?;
        let resolved = matcher::match_catalog(&resource_type, catalog);
        log::info!(
            "{raw}: {} action(s), {} data action(s)",
            resolved.actions.len(),
            resolved.data_actions.len()
        );
        Ok(Some(resolved))
    }

    /// Resolve a batch of raw resource types, in order.
    ///
    /// Stops at the first failure; no partial report is returned.
    pub fn resolve_all<S: AsRef<str>>(&mut self, raw_types: &[S]) -> Result<Report> {
        let mut report = Report::new();
        for raw in raw_types {
            let raw = raw.as_ref();
            if report.contains(raw) {
                continue;
            }
            if let Some(resolved) = self.resolve(raw)? {
                report.insert(raw, resolved);
            }
        }
        Ok(report)
    }
}
