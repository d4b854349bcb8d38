//! Azure CLI backend using `az provider operation show`.

use crate::backend::Backend;
use crate::catalog::OperationCatalog;
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Backend that executes real `az` commands.
///
/// Authentication is left entirely to the Azure CLI session.
pub struct AzBackend {
    /// Path to the az executable
    az_path: PathBuf,
}

impl AzBackend {
    /// Create a new AzBackend using `az` from PATH.
    ///
    /// Returns an error if the Azure CLI is not installed.
    pub fn new() -> Result<Self> {
        let az_path = which::which("az").map_err(|_| Error::AzNotFound)?;
        Ok(Self { az_path })
    }

    /// Create a backend for an explicit executable path.
    pub fn with_path(az_path: impl Into<PathBuf>) -> Self {
        Self {
            az_path: az_path.into(),
        }
    }

    /// Path of the executable this backend runs.
    pub fn az_path(&self) -> &Path {
        &self.az_path
    }

    /// Run an az command and return output.
    fn run_az(&self, args: &[&str]) -> Result<Output> {
        log::debug!("Running {} {}", self.az_path.display(), args.join(" "));

        Command::new(&self.az_path)
            .args(args)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::AzNotFound,
                _ => Error::CommandFailed {
                    message: format!("failed to execute {}: {}", self.az_path.display(), e),
                    stderr: String::new(),
                },
            })
    }

    /// Run an az command and return stdout, failing on a non-zero exit.
    fn run_az_checked(&self, args: &[&str], namespace: &str) -> Result<Vec<u8>> {
        let output = self.run_az(args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::from_az_output(&stderr, namespace));
        }

        Ok(output.stdout)
    }
}

impl Backend for AzBackend {
    fn provider_operations(&self, namespace: &str) -> Result<OperationCatalog> {
        let stdout = self.run_az_checked(&operation_show_args(namespace), namespace)?;
        OperationCatalog::from_json(namespace, &stdout)
    }
}

/// Arguments of the catalog lookup for a namespace.
fn operation_show_args(namespace: &str) -> [&str; 7] {
    [
        "provider",
        "operation",
        "show",
        "-n",
        namespace,
        "--output",
        "json",
    ]
}
