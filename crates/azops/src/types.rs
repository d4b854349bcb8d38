//! Core types for permission resolution.

use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Resource group type as users declare it.
const RESOURCE_GROUPS: &str = "Microsoft.Resources/resourceGroups";

/// Resource groups are modeled as a child of subscriptions in the catalog.
const RESOURCE_GROUPS_CANONICAL: &str = "Microsoft.Resources/subscriptions/resourceGroups";

/// A parsed resource type, ready for matching.
///
/// Built from a raw string of the form `<Namespace>/<segment>[/...][@<apiVersion>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    namespace: String,
    path: String,
}

impl ResourceType {
    /// Parse a raw resource type string.
    ///
    /// Returns `None` when the string has no `/` (or an empty namespace),
    /// since such entries cannot be looked up.
    pub fn parse(raw: &str) -> Option<Self> {
        let (namespace, _) = raw.split_once('/')?;
        if namespace.is_empty() {
            return None;
        }

        let path = raw.split_once('@').map_or(raw, |(path, _)| path);
        let path = if path.eq_ignore_ascii_case(RESOURCE_GROUPS) {
            RESOURCE_GROUPS_CANONICAL
        } else {
            path
        };

        Some(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Provider namespace (e.g. `Microsoft.Storage`), the catalog lookup key.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Canonical path without the API version.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Case-insensitive comparison of a candidate path with this type.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.eq_ignore_ascii_case(&self.path)
    }
}

/// Operations resolved for one resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedOperations {
    /// Management-plane operations (serialized as `action`)
    #[serde(rename = "action")]
    pub actions: Vec<String>,
    /// Data-plane operations
    #[serde(rename = "dataActions")]
    pub data_actions: Vec<String>,
}

impl ResolvedOperations {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation name to the list matching its plane.
    pub fn record(&mut self, name: &str, is_data_action: bool) {
        if is_data_action {
            self.data_actions.push(name.to_string());
        } else {
            self.actions.push(name.to_string());
        }
    }

    /// Whether nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.data_actions.is_empty()
    }
}

/// Resolved operations for a batch of raw resource types, keyed by the raw
/// string as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    entries: BTreeMap<String, ResolvedOperations>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for a raw resource type.
    pub fn insert(&mut self, raw: impl Into<String>, resolved: ResolvedOperations) {
        self.entries.insert(raw.into(), resolved);
    }

    /// Get the entry for a raw resource type.
    pub fn get(&self, raw: &str) -> Option<&ResolvedOperations> {
        self.entries.get(raw)
    }

    /// Whether the report has an entry for a raw resource type.
    pub fn contains(&self, raw: &str) -> bool {
        self.entries.contains_key(raw)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResolvedOperations)> {
        self.entries.iter()
    }

    /// Render as pretty-printed JSON with 2-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
