//! Bundle model to application model transform

use std::path::Path;

use super::APPDIR_PLACEHOLDER;
use super::application::{AppModule, AppShared, ApplicationModel};
use super::bundle::{BundleModel, ModuleDescriptor};

/// Derive the deploy-time application model from a bundle model
///
/// Source directories and dependencies are dropped. Paths into the installed
/// application are rewritten relative to the placeholder.
pub fn generate(bundle: &BundleModel) -> ApplicationModel {
    let shared_config = bundle
        .shared
        .as_ref()
        .is_some_and(|shared| shared.config_file.is_some());

    ApplicationModel {
        application_name: bundle.application_name.clone(),
        application_path: bundle.application_path.clone(),
        shared: bundle.shared.as_ref().map(|shared| AppShared {
            lib_dir: format!("{APPDIR_PLACEHOLDER}/shared/lib/"),
            resources_dir: shared
                .resources_dir
                .as_ref()
                .map(|_| format!("{APPDIR_PLACEHOLDER}/shared/resources/")),
        }),
        modules: bundle
            .modules
            .iter()
            .map(|module| app_module(module, shared_config))
            .collect(),
    }
}

fn app_module(module: &ModuleDescriptor, shared_config: bool) -> AppModule {
    let classname = &module.classname;
    let config_file = match &module.config_file {
        Some(file) => Some(format!(
            "{APPDIR_PLACEHOLDER}/{classname}/{}",
            base_name(file)
        )),
        None if shared_config => Some(format!("{APPDIR_PLACEHOLDER}/{classname}/{classname}.xml")),
        None => None,
    };

    AppModule {
        kind: module.kind,
        classname: classname.clone(),
        config_file,
        resources_dir: module
            .resources_dir
            .as_ref()
            .map(|_| format!("{APPDIR_PLACEHOLDER}/{classname}/resources/")),
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
