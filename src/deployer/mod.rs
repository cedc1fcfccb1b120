//! Bundle deployment
//!
//! Deploying a bundle runs five stages in order, each aborting the deploy on
//! failure:
//!
//! 1. **Open** - validate the bundle: extension, manifest, members, model
//! 2. **InstallModel** - write the model to `<home>/config/` with the
//!    placeholder replaced by the installed application directory
//! 3. **InstallLibraries** - copy shared libraries not yet present by name;
//!    extract shared resources
//! 4. **InstallModules** - extract each module archive into its own directory
//! 5. **Finalize** - create the log directory, drop temporary files and
//!    restart the host service
//!
//! Nothing on the host is touched until Open has succeeded. Completed stages
//! are not rolled back when a later stage fails.

pub mod libraries;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::common::fs::{ensure_dir, remove_dir_if_exists, remove_file_if_exists, reset_dir};
use crate::config::HostLayout;
use crate::error::{self, Result};
use crate::model::bundle::is_reserved_classname;
use crate::model::{ApplicationModel, BUNDLE_EXTENSION, is_plain_name};
use crate::package::BundleManifest;
use crate::toolchain::{Archiver, ServiceController};

use libraries::install_libraries;

/// Deployment stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Open,
    InstallModel,
    InstallLibraries,
    InstallModules,
    Finalize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::InstallModel => "install-model",
            Self::InstallLibraries => "install-libraries",
            Self::InstallModules => "install-modules",
            Self::Finalize => "finalize",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub application: String,
    pub app_dir: PathBuf,
    pub modules: Vec<String>,
    pub libraries_installed: Vec<String>,
    pub libraries_skipped: Vec<String>,
}

/// A validated bundle, ready to install
#[derive(Debug)]
struct OpenedBundle {
    path: PathBuf,
    manifest: BundleManifest,
    model: ApplicationModel,
}

/// Installs bundles into a host layout
pub struct Deployer<'a> {
    layout: &'a HostLayout,
    archiver: &'a dyn Archiver,
    controller: &'a dyn ServiceController,
}

impl<'a> Deployer<'a> {
    pub fn new(
        layout: &'a HostLayout,
        archiver: &'a dyn Archiver,
        controller: &'a dyn ServiceController,
    ) -> Self {
        Self {
            layout,
            archiver,
            controller,
        }
    }

    fn work_dir(&self) -> PathBuf {
        self.layout.temp_dir().join("deploy")
    }

    /// Deploy a bundle archive
    pub fn deploy(&self, bundle: &Path) -> Result<DeployReport> {
        self.run(bundle).inspect_err(|err| {
            tracing::error!("Deployment of {} failed: {err}", bundle.display());
        })
    }

    fn run(&self, bundle: &Path) -> Result<DeployReport> {
        tracing::info!("[{}] {}", Stage::Open, bundle.display());
        let opened = self.open(bundle).inspect_err(|_| {
            if let Err(err) = remove_dir_if_exists(&self.work_dir()) {
                tracing::warn!("Failed to clean up {}: {err}", self.work_dir().display());
            }
        })?;
        let application = opened.model.application_name.clone();
        let app_dir = self.layout.app_dir(&application);

        tracing::info!("[{}] {application}", Stage::InstallModel);
        self.install_model(&opened, &app_dir)?;

        tracing::info!("[{}] {application}", Stage::InstallLibraries);
        let libraries = self.install_libraries(&opened, &application)?;

        tracing::info!("[{}] {application}", Stage::InstallModules);
        let modules = self.install_modules(&opened, &application)?;

        tracing::info!("[{}] {application}", Stage::Finalize);
        self.finalize()?;

        Ok(DeployReport {
            application,
            app_dir,
            modules,
            libraries_installed: libraries.installed,
            libraries_skipped: libraries.skipped,
        })
    }

    fn open(&self, bundle: &Path) -> Result<OpenedBundle> {
        let has_extension = bundle
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(BUNDLE_EXTENSION));
        if !has_extension {
            return Err(error::deploy::validation_failed(format!(
                "'{}' does not have the .{BUNDLE_EXTENSION} extension",
                bundle.display()
            )));
        }
        if !bundle.is_file() {
            return Err(error::fs::not_found(bundle));
        }

        let manifest = self.archiver.read_manifest(bundle)?.ok_or_else(|| {
            error::deploy::validation_failed(format!("'{}' has no manifest", bundle.display()))
        })?;
        let manifest = BundleManifest::from_manifest(&manifest)?;
        if manifest.modules.is_empty() {
            return Err(error::deploy::validation_failed(
                "the manifest lists no modules",
            ));
        }

        let members = self.archiver.list_members(bundle)?;
        for member in manifest.members() {
            if !is_plain_name(member) {
                return Err(error::deploy::validation_failed(format!(
                    "manifest member '{member}' is not a plain file name"
                )));
            }
            if !members.iter().any(|name| name == member) {
                return Err(error::deploy::validation_failed(format!(
                    "member '{member}' named in the manifest is missing from the bundle"
                )));
            }
        }
        for member in &manifest.modules {
            let name = module_name(member);
            if is_reserved_classname(name) {
                return Err(error::deploy::validation_failed(format!(
                    "module '{name}' would overwrite the application's '{name}' directory"
                )));
            }
        }

        let work_dir = self.work_dir();
        reset_dir(&work_dir)?;
        let model_path = work_dir.join(&manifest.ham_file);
        self.archiver
            .extract_member(bundle, &manifest.ham_file, &model_path)?;
        let model = ApplicationModel::from_file(&model_path)?;
        if !is_plain_name(&model.application_name) {
            return Err(error::deploy::validation_failed(format!(
                "application name '{}' cannot be used as a directory name",
                model.application_name
            )));
        }

        Ok(OpenedBundle {
            path: bundle.to_path_buf(),
            manifest,
            model,
        })
    }

    fn install_model(&self, opened: &OpenedBundle, app_dir: &Path) -> Result<()> {
        let target = self.layout.config_dir().join(&opened.manifest.ham_file);
        opened.model.with_appdir(app_dir).write_to(&target)?;
        tracing::debug!("Installed model {}", target.display());
        Ok(())
    }

    fn install_libraries(
        &self,
        opened: &OpenedBundle,
        application: &str,
    ) -> Result<libraries::LibraryInstall> {
        let work_dir = self.work_dir();
        let mut result = libraries::LibraryInstall::default();

        if let Some(lib_jar) = &opened.manifest.lib_jar {
            let archive = work_dir.join(lib_jar);
            self.archiver.extract_member(&opened.path, lib_jar, &archive)?;
            let extracted = self.archiver.extract_all(&archive, &work_dir.join("lib"))?;
            result = install_libraries(&extracted, &self.layout.shared_lib_dir(application))?;
        }

        if let Some(resources) = &opened.manifest.shared_resources {
            let archive = work_dir.join(resources);
            self.archiver
                .extract_member(&opened.path, resources, &archive)?;
            let target = self.layout.shared_resources_dir(application);
            remove_dir_if_exists(&target)?;
            self.archiver.extract_all(&archive, &target)?;
        }

        Ok(result)
    }

    fn install_modules(&self, opened: &OpenedBundle, application: &str) -> Result<Vec<String>> {
        let staging = self.work_dir().join("modules");
        let mut installed = Vec::with_capacity(opened.manifest.modules.len());

        for member in &opened.manifest.modules {
            let name = module_name(member);
            let archive = staging.join(member);
            self.archiver.extract_member(&opened.path, member, &archive)?;

            let module_dir = self.layout.module_dir(application, name);
            remove_dir_if_exists(&module_dir)?;
            self.archiver.extract_all(&archive, &module_dir)?;
            tracing::debug!("Installed module {name} into {}", module_dir.display());
            installed.push(name.to_string());
        }

        Ok(installed)
    }

    fn finalize(&self) -> Result<()> {
        ensure_dir(&self.layout.log_dir())?;
        remove_dir_if_exists(&self.work_dir())?;
        self.controller.restart()
    }

    /// Remove an installed application and its model, then restart the host
    pub fn undeploy(&self, application: &str) -> Result<()> {
        if !is_plain_name(application) {
            return Err(error::deploy::validation_failed(format!(
                "'{application}' is not a valid application name"
            )));
        }

        let app_dir = self.layout.app_dir(application);
        let model_file = self.layout.model_file(application);
        if !app_dir.exists() && !model_file.exists() {
            return Err(error::deploy::application_not_found(application));
        }

        tracing::info!("Removing {}", app_dir.display());
        remove_dir_if_exists(&app_dir)?;
        remove_file_if_exists(&model_file)?;
        self.controller.restart()
    }
}

/// Module directory name of a module archive member
fn module_name(member: &str) -> &str {
    member.strip_suffix(".jar").unwrap_or(member)
}
