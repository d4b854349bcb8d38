//! Hierarchical matching of catalog operations against a resource type.
//!
//! An operation belongs to a resource type when its name, minus a trailing
//! `/action`, either equals the type (direct match) or equals it after
//! dropping the last path segment (parent match). Both checks run
//! independently and matches are never deduplicated: an operation listed
//! twice in the catalog is recorded twice.

use crate::catalog::{Operation, OperationCatalog};
use crate::types::{ResolvedOperations, ResourceType};

const ACTION_SUFFIX: &str = "/action";

/// Operation name with a trailing `/action` removed.
pub fn direct_candidate(name: &str) -> &str {
    name.strip_suffix(ACTION_SUFFIX).unwrap_or(name)
}

/// Direct candidate with its last segment dropped, if it has one.
pub fn parent_candidate(direct: &str) -> Option<&str> {
    direct.rsplit_once('/').map(|(parent, _)| parent)
}

/// Record `operation` into `resolved` once per rule it satisfies.
pub fn match_operation(
    resource_type: &ResourceType,
    operation: &Operation,
    resolved: &mut ResolvedOperations,
) {
    let direct = direct_candidate(&operation.name);

    if resource_type.matches(direct) {
        log::trace!("direct match: {}", operation.name);
        resolved.record(&operation.name, operation.is_data_action);
    }

    if parent_candidate(direct).is_some_and(|parent| resource_type.matches(parent)) {
        log::trace!("parent match: {}", operation.name);
        resolved.record(&operation.name, operation.is_data_action);
    }
}

/// Collect every operation of `catalog` that applies to `resource_type`,
/// in catalog order.
pub fn match_catalog(resource_type: &ResourceType, catalog: &OperationCatalog) -> ResolvedOperations {
    let mut resolved = ResolvedOperations::new();
    for operation in catalog.iter_operations() {
        match_operation(resource_type, operation, &mut resolved);
    }
    resolved
}
