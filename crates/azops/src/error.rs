//! Error types for permission resolution.
//!
//! Every error is fatal to a run. Categories exist so the CLI can tell the
//! user what kind of failure happened and what to do about it.

use std::path::PathBuf;
use thiserror::Error;

/// Categories of failures, one per stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A configuration file could not be read
    FileAccess,
    /// A configuration file is not valid HCL
    ConfigParse,
    /// The Azure CLI executable could not be found
    AzNotFound,
    /// The Azure CLI has no active session
    NotLoggedIn,
    /// The provider namespace is unknown to Azure
    ProviderNotFound,
    /// The Azure CLI ran but failed
    Lookup,
    /// The operation catalog had an unexpected shape
    CatalogDecode,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::FileAccess => "Could not read configuration file",
            Self::ConfigParse => "Invalid Terraform configuration",
            Self::AzNotFound => "Azure CLI not installed",
            Self::NotLoggedIn => "Azure CLI not logged in",
            Self::ProviderNotFound => "Unknown resource provider",
            Self::Lookup => "Azure CLI command failed",
            Self::CatalogDecode => "Unexpected operation catalog format",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::FileAccess => "Check that the file exists and is readable",
            Self::ConfigParse => "Fix the syntax error reported above (try `terraform fmt`)",
            Self::AzNotFound => {
                "Install the Azure CLI from https://aka.ms/azcli or set AZPERM_AZ_PATH"
            }
            Self::NotLoggedIn => "Run `az login` and try again",
            Self::ProviderNotFound => "Check the provider namespace of the resource type",
            Self::Lookup => "Check the Azure CLI error output for details",
            Self::CatalogDecode => "Upgrade the Azure CLI; its output format may have changed",
            Self::Other => "Check the error details for more information",
        }
    }
}

/// Errors that can occur while extracting resource types or resolving
/// their operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file could not be read
    #[error("could not read {}: {source}", .path.display())]
    ConfigRead {
        /// Path of the file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed
    #[error("could not parse {}: {source}", .path.display())]
    ConfigParse {
        /// Path (or name) of the document
        path: PathBuf,
        /// Underlying HCL error
        #[source]
        source: hcl::Error,
    },

    /// Azure CLI is not installed or not found in PATH
    #[error("Azure CLI (`az`) not found. Install it from https://aka.ms/azcli")]
    AzNotFound,

    /// Azure CLI has no valid session
    #[error("Azure CLI is not logged in: {stderr}")]
    NotLoggedIn {
        /// Standard error output from the failed command
        stderr: String,
    },

    /// Provider namespace rejected by Azure
    #[error("resource provider not found: {namespace}")]
    ProviderNotFound {
        /// Namespace that was looked up
        namespace: String,
    },

    /// Command execution failed
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output from the failed command
        stderr: String,
    },

    /// The operation catalog did not match the expected schema
    #[error("unexpected operation catalog for {namespace}: {source}")]
    CatalogDecode {
        /// Namespace whose catalog failed to decode
        namespace: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ConfigRead { .. } => ErrorCategory::FileAccess,
            Error::ConfigParse { .. } => ErrorCategory::ConfigParse,
            Error::AzNotFound => ErrorCategory::AzNotFound,
            Error::NotLoggedIn { .. } => ErrorCategory::NotLoggedIn,
            Error::ProviderNotFound { .. } => ErrorCategory::ProviderNotFound,
            Error::CommandFailed { .. } => ErrorCategory::Lookup,
            Error::CatalogDecode { .. } => ErrorCategory::CatalogDecode,
            _ => ErrorCategory::Other,
        }
    }

    /// Create an error from the stderr of a failed `az provider operation show`.
    ///
    /// Analyzes stderr to categorize the error appropriately.
    pub fn from_az_output(stderr: &str, namespace: &str) -> Self {
        let stderr_lower = stderr.to_lowercase();

        if stderr_lower.contains("az login")
            || stderr_lower.contains("please run 'az login'")
            || stderr_lower.contains("no subscription found")
            || stderr_lower.contains("aadsts")
            || stderr_lower.contains("token has expired")
        {
            return Error::NotLoggedIn {
                stderr: stderr.trim().to_string(),
            };
        }

        if stderr_lower.contains("invalidresourcenamespace")
            || stderr_lower.contains("resource namespace")
            || stderr_lower.contains("was not found")
        {
            return Error::ProviderNotFound {
                namespace: namespace.to_string(),
            };
        }

        Error::CommandFailed {
            message: format!("az provider operation show failed for {namespace}"),
            stderr: stderr.trim().to_string(),
        }
    }
}

/// Result type for permission resolution.
pub type Result<T> = std::result::Result<T, Error>;
