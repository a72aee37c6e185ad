use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::brokers::DEFAULT_BROKER_ROLE;
use crate::error::{Result, TfvarsError};

pub const DEFAULT_CONFIG_FILE: &str = "tfvars.yaml";
pub const DEFAULT_OUTPUT: &str = "terraform/terraform.tfvars";

/// Optional `tfvars.yaml` overrides. Every key may be omitted.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub output: PathBuf,
    pub broker_role: String,
    /// Defaults to `~/.ssh/id_rsa_corax.pub` when unset.
    pub public_key_path: Option<PathBuf>,
    pub fallback_to_all_nodes: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            broker_role: DEFAULT_BROKER_ROLE.to_string(),
            public_key_path: None,
            fallback_to_all_nodes: true,
        }
    }
}

impl GeneratorConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| TfvarsError::io(path, e))?;
        let config: GeneratorConfig =
            serde_yaml_ng::from_str(&contents).map_err(|e| TfvarsError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.broker_role.trim().is_empty() {
            return Err(TfvarsError::Config {
                path: path.to_path_buf(),
                message: "broker_role cannot be empty".to_string(),
            });
        }
        if self.output.as_os_str().is_empty() {
            return Err(TfvarsError::Config {
                path: path.to_path_buf(),
                message: "output cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}
