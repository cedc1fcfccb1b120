//! Bundle and application model documents
//!
//! A bundle model (`.hbm`) describes an application at build time: its modules,
//! their sources, configuration, resources and dependencies. The application
//! model (`.ham`) is derived from it and describes where a host finds each
//! module's configuration and resources once installed, with paths expressed
//! relative to the [`APPDIR_PLACEHOLDER`] token.

pub mod application;
pub mod bundle;
pub mod dependency;
pub mod document;
pub mod generator;
pub mod schema;

use std::path::Path;

pub use application::{AppModule, AppShared, ApplicationModel};
pub use bundle::{BundleModel, ModuleDescriptor, ModuleKind, Shared};
pub use dependency::{Dependency, DependencyKind};
pub use generator::generate;

/// Token standing in for the installed application directory until deploy time
pub const APPDIR_PLACEHOLDER: &str = "{APPDIR}";

/// File extension of bundle archives
pub const BUNDLE_EXTENSION: &str = "hab";

/// File extension of serialized application models
pub const MODEL_EXTENSION: &str = "ham";

/// XML tags shared by both model documents
pub mod tags {
    pub const BUNDLE_ROOT: &str = "hemera-bundle-model";
    pub const APPLICATION_ROOT: &str = "hemera-application-model";
    pub const APPLICATION_NAME: &str = "application-name";
    pub const APPLICATION_PATH: &str = "application-path";
    pub const SHARED: &str = "shared";
    pub const MODULES: &str = "modules";
    pub const MODULE: &str = "module";
    pub const RESOURCES: &str = "resources";
    pub const RESOURCE: &str = "resource";
    pub const SOURCE_DIR: &str = "src-dir";
    pub const CLASSNAME: &str = "classname";
    pub const CONFIG_FILE: &str = "config-file";
    pub const RESOURCES_DIR: &str = "resources-dir";
    pub const LIB_DIR: &str = "lib-dir";
    pub const DEPENDENCIES: &str = "dependencies";
    pub const DEPENDENCY: &str = "dependency";
    pub const TYPE: &str = "type";
    pub const VALUE: &str = "value";
}

/// Replace every placeholder occurrence in a path value with the concrete
/// application directory
///
/// Operates on plain strings; documents are resolved through
/// [`ApplicationModel::with_appdir`] so the result is escaped on output.
pub fn substitute_appdir(value: &str, app_dir: &Path) -> String {
    let dir = app_dir.display().to_string();
    let dir = dir.trim_end_matches(['/', '\\']);
    value.replace(APPDIR_PLACEHOLDER, dir)
}

/// A single path component that stays inside its parent directory
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Name of the serialized model member for an application
pub fn model_file_name(application_name: &str) -> String {
    format!("{}.{}", application_name.to_lowercase(), MODEL_EXTENSION)
}
