//! Resource type extraction from Terraform configuration.
//!
//! Only `resource` and `data` blocks of the AzAPI provider declare their
//! Azure resource type explicitly:
//!
//! ```text
//! resource "azapi_resource" "account" {
//!   type = "Microsoft.Storage/storageAccounts@2023-01-01"
//!   ...
//! }
//! ```
//!
//! Every top-level block whose first label contains the provider filter
//! contributes the text of its `type` attribute, with surrounding whitespace
//! and quotes trimmed.

use crate::error::{Error, Result};
use hcl::{Block, Body, Expression};
use std::path::{Path, PathBuf};

/// Substring identifying AzAPI resource and data source labels.
pub const DEFAULT_PROVIDER_FILTER: &str = "azapi";

const BLOCK_KINDS: [&str; 2] = ["resource", "data"];

const TYPE_ATTRIBUTE: &str = "type";

/// Extracts raw resource type strings from Terraform documents.
#[derive(Debug, Clone)]
pub struct Extractor {
    provider_filter: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_PROVIDER_FILTER)
    }
}

impl Extractor {
    /// Create an extractor matching block labels that contain `provider_filter`.
    pub fn new(provider_filter: impl Into<String>) -> Self {
        Self {
            provider_filter: provider_filter.into(),
        }
    }

    /// Provider label substring this extractor looks for.
    pub fn provider_filter(&self) -> &str {
        &self.provider_filter
    }

    /// Extract resource types from several files, in file order.
    ///
    /// Stops at the first unreadable or unparsable file.
    pub fn extract_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<String>> {
        let mut types = Vec::new();
        for path in paths {
            types.extend(self.extract_file(path.as_ref())?);
        }
        Ok(types)
    }

    /// Extract resource types from one file.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let types = self.extract_str(&content, path)?;
        log::debug!(
            "Found {} resource type(s) in {}",
            types.len(),
            path.display()
        );
        Ok(types)
    }

    /// Extract resource types from document content. `name` identifies the
    /// document in errors.
    pub fn extract_str(&self, content: &str, name: impl Into<PathBuf>) -> Result<Vec<String>> {
        let body: Body = hcl::parse(content).map_err(|source| Error::ConfigParse {
            path: name.into(),
            source,
        })?;

        let mut types = Vec::new();
        for block in body.blocks().filter(|block| self.is_provider_block(block)) {
            if let Some(expr) = type_expression(block) {
                types.push(expression_text(expr));
            }
        }
        Ok(types)
    }

    fn is_provider_block(&self, block: &Block) -> bool {
        BLOCK_KINDS.contains(&block.identifier())
            && block
                .labels()
                .first()
                .is_some_and(|label| label.as_str().contains(self.provider_filter.as_str()))
    }
}

fn type_expression(block: &Block) -> Option<&Expression> {
    block
        .body()
        .attributes()
        .find(|attr| attr.key() == TYPE_ATTRIBUTE)
        .map(|attr| attr.expr())
}

/// Source text of an expression, trimmed of whitespace and quotes.
fn expression_text(expr: &Expression) -> String {
    let text = match expr {
        Expression::String(value) => value.clone(),
        other => other.to_string(),
    };
    text.trim_matches(|c: char| c.is_whitespace() || c == '"')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    const MAIN_TF: &str = r#"
terraform {
  required_providers {
    azapi = {
      source = "Azure/azapi"
    }
  }
}

resource "azurerm_resource_group" "example" {
  name     = "example"
  location = "westeurope"
}

resource "azapi_resource" "account" {
  type      = "Microsoft.Storage/storageAccounts@2023-01-01"
  name      = "example"
  parent_id = azurerm_resource_group.example.id
}

data "azapi_resource" "rg" {
  type = "Microsoft.Resources/resourceGroups@2021-04-01"
  name = "example"
}

resource "azapi_resource_action" "keys" {
  type        = "Microsoft.Storage/storageAccounts@2023-01-01"
  resource_id = azapi_resource.account.id
  action      = "listKeys"
}

resource "azapi_update_resource" "no_type" {
  resource_id = azapi_resource.account.id
}
"#;

    #[test]
    fn test_extract_azapi_blocks_in_order() {
        let types = Extractor::default().extract_str(MAIN_TF, "main.tf").unwrap();
        assert_eq!(
            types,
            vec![
                "Microsoft.Storage/storageAccounts@2023-01-01",
                "Microsoft.Resources/resourceGroups@2021-04-01",
                "Microsoft.Storage/storageAccounts@2023-01-01",
            ]
        );
    }

    #[test]
    fn test_other_block_kinds_ignored() {
        let content = r#"
output "azapi_type" {
  value = "Microsoft.Web/sites"
}

module "azapi_stuff" {
  source = "./azapi"
  type   = "Microsoft.Web/sites"
}
"#;
        let types = Extractor::default().extract_str(content, "outputs.tf").unwrap();
        assert!(types.is_empty());
    }

    #[test]
    fn test_custom_provider_filter() {
        let extractor = Extractor::new("azurerm");
        assert_eq!(extractor.provider_filter(), "azurerm");

        let types = extractor.extract_str(MAIN_TF, "main.tf").unwrap();
        // The azurerm block has no `type` attribute
        assert!(types.is_empty());

        let content = r#"
resource "azurerm_custom" "x" {
  type = "Microsoft.Web/sites"
}
"#;
        let types = extractor.extract_str(content, "x.tf").unwrap();
        assert_eq!(types, vec!["Microsoft.Web/sites"]);
    }

    #[test]
    fn test_non_literal_type_expression() {
        let content = r#"
resource "azapi_resource" "x" {
  type = "${local.namespace}/storageAccounts@2023-01-01"
}
"#;
        let types = Extractor::default().extract_str(content, "x.tf").unwrap();
        assert_eq!(types, vec!["${local.namespace}/storageAccounts@2023-01-01"]);
    }

    #[test]
    fn test_parse_error() {
        let err = Extractor::default()
            .extract_str("resource \"azapi_resource\" \"x\" {\n  type = \n", "broken.tf")
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ConfigParse);
        assert!(err.to_string().contains("broken.tf"));
    }

    #[test]
    fn test_extract_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("main.tf");
        let second = dir.path().join("network.tf");
        std::fs::write(&first, MAIN_TF).unwrap();
        std::fs::write(
            &second,
            "resource \"azapi_resource\" \"vnet\" {\n  type = \"Microsoft.Network/virtualNetworks@2023-04-01\"\n}\n",
        )
        .unwrap();

        let types = Extractor::default().extract_files(&[&second, &first]).unwrap();
        assert_eq!(types.len(), 4);
        assert_eq!(types[0], "Microsoft.Network/virtualNetworks@2023-04-01");
        assert_eq!(types[1], "Microsoft.Storage/storageAccounts@2023-01-01");
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("main.tf");
        std::fs::write(&present, MAIN_TF).unwrap();
        let missing = dir.path().join("missing.tf");

        let err = Extractor::default()
            .extract_files(&[&present, &missing])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::FileAccess);
        assert!(err.to_string().contains("missing.tf"));
    }
}
