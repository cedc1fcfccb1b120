//! Bundle build pipeline
//!
//! Parses a descriptor, builds every module, packs the shared libraries and
//! resources, generates the application model and assembles the bundle. All
//! intermediate files live below `<home>/temp/`, which is wiped before and
//! after each run.

use std::path::Path;

use crate::builder::library::{build_library_archive, build_resources_archive};
use crate::builder::{BuildLayout, ModuleBuilder};
use crate::common::fs::{ensure_dir, remove_dir_if_exists, reset_dir};
use crate::config::HostLayout;
use crate::error::Result;
use crate::model::{BundleModel, generate};
use crate::package::{BundleArchive, BundleInputs, assemble, bundle_file_name};
use crate::progress::ProgressDisplay;
use crate::toolchain::{Archiver, Compiler};

/// Runs the build pipeline for bundle descriptors
pub struct Bundler<'a> {
    layout: &'a HostLayout,
    compiler: &'a dyn Compiler,
    archiver: &'a dyn Archiver,
    show_progress: bool,
}

impl<'a> Bundler<'a> {
    pub fn new(
        layout: &'a HostLayout,
        compiler: &'a dyn Compiler,
        archiver: &'a dyn Archiver,
    ) -> Self {
        Self {
            layout,
            compiler,
            archiver,
            show_progress: false,
        }
    }

    /// Show a progress bar while modules are built
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Build `<target_dir>/<application-name>.hab` from a descriptor
    pub fn bundle(&self, descriptor: &Path, target_dir: &Path) -> Result<BundleArchive> {
        self.run(descriptor, target_dir).inspect_err(|err| {
            tracing::error!("Bundling {} failed: {err}", descriptor.display());
        })
    }

    fn run(&self, descriptor: &Path, target_dir: &Path) -> Result<BundleArchive> {
        tracing::info!("Reading bundle model {}", descriptor.display());
        let model = BundleModel::from_file(descriptor)?;

        let build = BuildLayout::new(self.layout.temp_dir());
        reset_dir(build.root())?;
        let result = self.build(&model, &build, target_dir);
        let cleanup = remove_dir_if_exists(build.root());

        let archive = result?;
        cleanup?;
        Ok(archive)
    }

    fn build(&self, model: &BundleModel, build: &BuildLayout, target_dir: &Path) -> Result<BundleArchive> {
        let builder = ModuleBuilder::new(self.compiler, self.archiver, model, build)?;
        let progress = self
            .show_progress
            .then(|| ProgressDisplay::new(model.modules.len() as u64));

        let mut modules = Vec::with_capacity(model.modules.len());
        let mut libraries = Vec::new();
        for module in &model.modules {
            tracing::info!("Building module {}", module.classname);
            if let Some(progress) = &progress {
                progress.update_module(&module.classname);
            }

            let artifact = match builder.build(module) {
                Ok(artifact) => artifact,
                Err(err) => {
                    if let Some(progress) = &progress {
                        progress.abandon();
                    }
                    return Err(err);
                }
            };
            libraries.extend(artifact.libraries);
            modules.push(artifact.archive);

            if let Some(progress) = &progress {
                progress.inc_module();
            }
        }
        if let Some(progress) = &progress {
            progress.finish();
        }

        let library = build_library_archive(self.archiver, &libraries, &build.library_archive())?;
        let resources_dir = model
            .shared
            .as_ref()
            .and_then(|shared| shared.resources_dir.as_deref())
            .map(|dir| model.resolve_path(dir));
        let shared_resources = build_resources_archive(
            self.archiver,
            resources_dir.as_deref(),
            &build.shared_resources_archive(),
        )?;

        tracing::info!("Generating application model for {}", model.application_name);
        let model_file = build.model_file(&model.application_name);
        generate(model).write_to(&model_file)?;

        ensure_dir(target_dir)?;
        let target = target_dir.join(bundle_file_name(&model.application_name));
        assemble(
            self.archiver,
            &BundleInputs {
                modules,
                library,
                shared_resources,
                model: model_file,
            },
            &target,
        )
    }
}
