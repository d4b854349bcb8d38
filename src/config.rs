use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::paths;

/// Environment variable overriding the Azure CLI executable
pub const ENV_AZ_PATH: &str = "AZPERM_AZ_PATH";

const CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Main Config Schema
// ============================================================================

/// Optional user configuration, read from `<config dir>/config.toml`
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Azure CLI settings
    #[serde(default)]
    pub az: AzConfig,

    /// Terraform extraction settings
    #[serde(default)]
    pub terraform: TerraformConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct AzConfig {
    /// Explicit path to the `az` executable (default: looked up in PATH)
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TerraformConfig {
    /// Substring of block labels identifying the AzAPI provider
    #[serde(default = "default_provider_filter")]
    pub provider_filter: String,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            provider_filter: default_provider_filter(),
        }
    }
}

fn default_provider_filter() -> String {
    azops::terraform::DEFAULT_PROVIDER_FILTER.to_string()
}

impl Config {
    /// Load the config from the config directory, or defaults if absent
    pub fn load() -> Result<Self> {
        let path = paths::config_dir()?.join(CONFIG_FILE);
        Self::load_from(&path)
    }

    /// Load the config from a specific file, or defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;

        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML format in {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Azure CLI executable to use, if one is configured.
    ///
    /// `AZPERM_AZ_PATH` takes precedence over the config file.
    pub fn az_path(&self) -> Option<PathBuf> {
        self.az_path_with(std::env::var(ENV_AZ_PATH).ok())
    }

    fn az_path_with(&self, env_override: Option<String>) -> Option<PathBuf> {
        env_override
            .filter(|p| !p.trim().is_empty())
            .or_else(|| self.az.path.clone())
            .map(|p| paths::expand(&p))
    }
}
