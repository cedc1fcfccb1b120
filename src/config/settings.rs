//! Tool settings (`<home>/config/hemera.yaml`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Settings file name below the host configuration directory
pub const SETTINGS_FILE: &str = "hemera.yaml";

/// External tools used by the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolSettings {
    #[serde(default)]
    pub compiler: CompilerSettings,

    #[serde(default)]
    pub service: ServiceSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerSettings {
    #[serde(default = "default_compiler")]
    pub program: String,

    /// Extra arguments passed before the output and classpath options
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_compiler() -> String {
    "javac".to_string()
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            program: default_compiler(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSettings {
    /// Script invoked with `stop` and `start`; absent means no service control
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<PathBuf>,
}

impl ToolSettings {
    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| error::fs::read_failed(path, e))?;
        let settings: Self = serde_yaml::from_str(&content)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.compiler.program.trim().is_empty() {
            return Err(error::config::invalid("compiler program cannot be empty"));
        }
        Ok(())
    }
}
