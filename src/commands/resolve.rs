//! Resolve Azure RBAC operations for Terraform files and explicit resource
//! types using azops.

use anyhow::{Context, Result};
use azops::backend::{Backend, az::AzBackend};
use azops::terraform::Extractor;
use azops::{Report, ResourceType, Resolver};
use std::path::PathBuf;

use crate::Context as AppContext;
use crate::cli::ResolveArgs;
use crate::config::Config;
use crate::paths;
use crate::ui;

pub fn run(ctx: &AppContext, args: ResolveArgs) -> Result<()> {
    let config = Config::load()?;

    let raw_types = collect_resource_types(&config, &args)?;
    log::debug!("Collected {} resource type(s)", raw_types.len());

    // Nothing resolvable means nothing to look up, so az is not required
    let report = if raw_types.iter().any(|raw| ResourceType::parse(raw).is_some()) {
        build_report(create_backend(&config)?, &raw_types)?
    } else {
        Report::new()
    };

    let output = report
        .to_json_pretty()
        .context("Failed to serialize result")?;
    println!("{output}");

    if ctx.verbose > 0 && !ctx.quiet {
        ui::info(&format!("Resolved {} resource type(s)", report.len()));
    }

    Ok(())
}

/// Resource types from the files (in file order), then the explicit ones.
fn collect_resource_types(config: &Config, args: &ResolveArgs) -> Result<Vec<String>> {
    let files: Vec<PathBuf> = args.file_names.iter().map(|f| paths::expand(f)).collect();

    let extractor = Extractor::new(config.terraform.provider_filter.as_str());
    let mut types = extractor.extract_files(&files)?;
    types.extend(args.resource_types.iter().cloned());
    Ok(types)
}

/// Create the Azure CLI backend, with the configured executable if any.
fn create_backend(config: &Config) -> Result<Box<dyn Backend>> {
    let backend = match config.az_path() {
        Some(path) => AzBackend::with_path(path),
        None => AzBackend::new()?,
    };
    log::debug!("Using Azure CLI at {}", backend.az_path().display());
    Ok(Box::new(backend))
}

fn build_report(backend: Box<dyn Backend>, raw_types: &[String]) -> Result<Report> {
    let mut resolver = Resolver::with_backend(backend);
    let report = resolver.resolve_all(raw_types)?;
    log::info!(
        "Looked up {} provider namespace(s)",
        resolver.cached_namespaces()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use azops::{ErrorCategory, Operation, OperationCatalog, ResourceTypeEntry};

    /// Backend serving canned catalogs.
    struct StubBackend;

    impl Backend for StubBackend {
        fn provider_operations(&self, namespace: &str) -> azops::Result<OperationCatalog> {
            let operations = match namespace {
                "Microsoft.Storage" => vec![Operation::action("Microsoft.Storage/storageAccounts/read")],
                _ => vec![],
            };
            Ok(OperationCatalog {
                operations: vec![],
                resource_types: vec![ResourceTypeEntry {
                    name: None,
                    operations,
                }],
            })
        }
    }

    fn args(file_names: Vec<String>, resource_types: Vec<&str>) -> ResolveArgs {
        ResolveArgs {
            file_names,
            resource_types: resource_types.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_files_then_explicit_types() {
        let dir = tempfile::tempdir().unwrap();
        let main_tf = dir.path().join("main.tf");
        std::fs::write(
            &main_tf,
            r#"
resource "azapi_resource" "account" {
  type = "Microsoft.Storage/storageAccounts@2023-01-01"
}

resource "azurerm_storage_account" "legacy" {
  name = "legacy"
}
"#,
        )
        .unwrap();

        let args = args(
            vec![main_tf.display().to_string()],
            vec!["Microsoft.Web/sites"],
        );
        let types = collect_resource_types(&Config::default(), &args).unwrap();
        assert_eq!(
            types,
            vec!["Microsoft.Storage/storageAccounts@2023-01-01", "Microsoft.Web/sites"]
        );
    }

    #[test]
    fn test_missing_file_aborts() {
        let args = args(vec!["/nonexistent/azperm/main.tf".to_string()], vec![]);
        let err = collect_resource_types(&Config::default(), &args).unwrap_err();
        let category = err.downcast_ref::<azops::Error>().map(azops::Error::category);
        assert_eq!(category, Some(ErrorCategory::FileAccess));
    }

    #[test]
    fn test_end_to_end_output() {
        let dir = tempfile::tempdir().unwrap();
        let main_tf = dir.path().join("main.tf");
        std::fs::write(
            &main_tf,
            "resource \"azapi_resource\" \"account\" {\n  type = \"Microsoft.Storage/storageAccounts@2023-01-01\"\n}\n",
        )
        .unwrap();

        let args = args(vec![main_tf.display().to_string()], vec![]);
        let types = collect_resource_types(&Config::default(), &args).unwrap();
        let report = build_report(Box::new(StubBackend), &types).unwrap();

        let expected = r#"{
  "Microsoft.Storage/storageAccounts@2023-01-01": {
    "action": [
      "Microsoft.Storage/storageAccounts/read"
    ],
    "dataActions": []
  }
}"#;
        assert_eq!(report.to_json_pretty().unwrap(), expected);
    }

    #[test]
    fn test_shared_namespace_looked_up_once() {
        let mut resolver = Resolver::with_backend(Box::new(StubBackend));
        let types = vec![
            "Microsoft.Storage/storageAccounts".to_string(),
            "Microsoft.Storage/storageAccounts/blobServices@2023-01-01".to_string(),
            "Microsoft.Web/sites".to_string(),
            "invalid".to_string(),
        ];

        let report = resolver.resolve_all(&types).unwrap();
        assert_eq!(report.len(), 3);
        assert_eq!(resolver.cached_namespaces(), 2);
    }
}
