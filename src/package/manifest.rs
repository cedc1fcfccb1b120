//! Bundle manifest attributes

use crate::error::{self, Result};
use crate::toolchain::Manifest;

pub const MANIFEST_VERSION: &str = "Manifest-Version";
pub const SPECIFICATION_VENDOR: &str = "Specification-Vendor";
pub const SPECIFICATION_VERSION: &str = "Specification-Version";
pub const MODULES: &str = "modules";
pub const LIB_JAR: &str = "lib_jar";
pub const SHARED_RESOURCES: &str = "shared_resources";
pub const HAM_FILE: &str = "ham_file";

const VENDOR: &str = "Hemera";
const MODULE_SEPARATOR: char = ';';

/// Typed view of a bundle's manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleManifest {
    /// Module archive member names, in build order
    pub modules: Vec<String>,
    pub lib_jar: Option<String>,
    pub shared_resources: Option<String>,
    pub ham_file: String,
    pub version: String,
}

impl BundleManifest {
    pub fn new(modules: Vec<String>, ham_file: impl Into<String>) -> Self {
        Self {
            modules,
            lib_jar: None,
            shared_resources: None,
            ham_file: ham_file.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Every member the manifest refers to
    pub fn members(&self) -> Vec<&str> {
        let mut members: Vec<&str> = self.modules.iter().map(String::as_str).collect();
        members.extend(self.lib_jar.as_deref());
        members.extend(self.shared_resources.as_deref());
        members.push(&self.ham_file);
        members
    }

    pub fn to_manifest(&self) -> Manifest {
        let mut manifest = Manifest::new();
        manifest.insert(MANIFEST_VERSION, "1.0");
        manifest.insert(SPECIFICATION_VENDOR, VENDOR);
        manifest.insert(SPECIFICATION_VERSION, self.version.clone());
        manifest.insert(MODULES, self.modules.join(&MODULE_SEPARATOR.to_string()));
        if let Some(lib_jar) = &self.lib_jar {
            manifest.insert(LIB_JAR, lib_jar.clone());
        }
        if let Some(resources) = &self.shared_resources {
            manifest.insert(SHARED_RESOURCES, resources.clone());
        }
        manifest.insert(HAM_FILE, self.ham_file.clone());
        manifest
    }

    /// Read the bundle attributes; a missing `modules` or `ham_file` is invalid
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let require = |key: &str| {
            manifest
                .get(key)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    error::deploy::validation_failed(format!(
                        "manifest attribute '{key}' is missing"
                    ))
                })
        };
        let optional = |key: &str| {
            manifest
                .get(key)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let modules: Vec<String> = require(MODULES)?
            .split(MODULE_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            modules,
            lib_jar: optional(LIB_JAR),
            shared_resources: optional(SHARED_RESOURCES),
            ham_file: require(HAM_FILE)?.to_string(),
            version: optional(SPECIFICATION_VERSION).unwrap_or_default(),
        })
    }
}
