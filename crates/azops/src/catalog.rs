//! Operation catalog of a resource provider namespace.
//!
//! Mirrors the JSON printed by `az provider operation show -n <namespace>`:
//!
//! ```text
//! {
//!   "operations": [ { "name": "...", "isDataAction": false }, ... ],
//!   "resourceTypes": [ { "name": "...", "operations": [ ... ] }, ... ]
//! }
//! ```
//!
//! Fields not listed here (display names, descriptions, origins) are ignored.

use crate::error::{Error, Result};
use serde::Deserialize;

/// A single permission operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Hierarchical operation name (e.g. `Microsoft.Storage/storageAccounts/read`)
    pub name: String,
    /// Whether this is a data-plane operation
    pub is_data_action: bool,
}

impl Operation {
    /// Create a management-plane operation.
    pub fn action(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_data_action: false,
        }
    }

    /// Create a data-plane operation.
    pub fn data_action(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_data_action: true,
        }
    }
}

/// Operations scoped to one resource type of the namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceTypeEntry {
    /// Resource type name relative to the namespace, when reported
    #[serde(default)]
    pub name: Option<String>,
    /// Operations of this resource type
    pub operations: Vec<Operation>,
}

/// All operations exposed by a provider namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationCatalog {
    /// Namespace-level operations
    pub operations: Vec<Operation>,
    /// Per-resource-type operations
    pub resource_types: Vec<ResourceTypeEntry>,
}

impl OperationCatalog {
    /// Decode a catalog from the Azure CLI's JSON output.
    pub fn from_json(namespace: &str, bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|source| Error::CatalogDecode {
            namespace: namespace.to_string(),
            source,
        })
    }

    /// Iterate over every operation: namespace-level first, then each
    /// resource type's operations in catalog order.
    pub fn iter_operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().chain(
            self.resource_types
                .iter()
                .flat_map(|entry| entry.operations.iter()),
        )
    }

    /// Total number of operations in the catalog.
    pub fn len(&self) -> usize {
        self.operations.len()
            + self
                .resource_types
                .iter()
                .map(|entry| entry.operations.len())
                .sum::<usize>()
    }

    /// Whether the catalog has no operations at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
