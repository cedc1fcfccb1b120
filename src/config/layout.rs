//! Host installation layout
//!
//! Every directory the deployer writes to is derived from a single home
//! directory:
//!
//! ```text
//! <home>/
//!   bin/
//!   apps/<app>/shared/lib/
//!   apps/<app>/shared/resources/
//!   apps/<app>/<module classname>/
//!   config/<app>.ham
//!   config/hemera.yaml
//!   log/
//!   temp/
//! ```

use std::env;
use std::path::{Path, PathBuf};

use super::settings::SETTINGS_FILE;
use crate::error::{self, Result};
use crate::model;

/// Environment variable overriding the default home directory
pub const HOME_ENV: &str = "HEMERA_HOME";

const DEFAULT_HOME_DIR: &str = ".hemera";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLayout {
    home: PathBuf,
}

impl HostLayout {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Resolve the home directory: explicit value, then `HEMERA_HOME`, then `~/.hemera`
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(home) = explicit {
            return Ok(Self::new(home));
        }
        if let Some(home) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            return Ok(Self::new(home));
        }
        dirs::home_dir()
            .map(|home| Self::new(home.join(DEFAULT_HOME_DIR)))
            .ok_or_else(|| {
                error::config::invalid(format!(
                    "cannot determine the home directory; pass --home or set {HOME_ENV}"
                ))
            })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.home.join("bin")
    }

    pub fn apps_dir(&self) -> PathBuf {
        self.home.join("apps")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.home.join("config")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.home.join("log")
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.home.join("temp")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir().join(SETTINGS_FILE)
    }

    /// Installed directory of an application; what the placeholder resolves to
    pub fn app_dir(&self, application: &str) -> PathBuf {
        self.apps_dir().join(application)
    }

    pub fn shared_lib_dir(&self, application: &str) -> PathBuf {
        self.app_dir(application).join("shared").join("lib")
    }

    pub fn shared_resources_dir(&self, application: &str) -> PathBuf {
        self.app_dir(application).join("shared").join("resources")
    }

    pub fn module_dir(&self, application: &str, classname: &str) -> PathBuf {
        self.app_dir(application).join(classname)
    }

    /// Installed application model of an application
    pub fn model_file(&self, application: &str) -> PathBuf {
        self.config_dir().join(model::model_file_name(application))
    }
}
