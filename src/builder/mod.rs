//! Module and resource builds
//!
//! Each module is built in its own scratch directory named after its classname
//! (`scratch/<classname>/`):
//!
//! 1. resolve the module's and the shared dependencies into a classpath
//! 2. compile the sources into `<scratch>/classes/`
//! 3. pack the classes into `<scratch>/<classname>.jar`
//! 4. merge the module configuration with the shared configuration
//! 5. pack class archive, configuration and resources into
//!    `modules/<classname>.jar`

pub mod library;

use std::path::{Path, PathBuf};

use xmltree::Element;

use crate::common::fs::{ensure_dir, remove_dir_if_exists, reset_dir};
use crate::config::merge::{self, load_config};
use crate::error::Result;
use crate::model::{BundleModel, ModuleDescriptor, model_file_name};
use crate::resolver::DependencyResolver;
use crate::toolchain::{ArchiveEntry, Archiver, Compiler};

/// Archive member prefix of a module's resources
pub const RESOURCES_PREFIX: &str = "resources";

/// Shared library archive name
pub const LIBRARY_ARCHIVE: &str = "lib.jar";

/// Shared resources archive name
pub const SHARED_RESOURCES_ARCHIVE: &str = "shared-resources.jar";

/// Layout of the build's temporary directory
#[derive(Debug, Clone)]
pub struct BuildLayout {
    root: PathBuf,
}

impl BuildLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Archives built from source dependencies
    pub fn dependencies_dir(&self) -> PathBuf {
        self.root.join("dependencies")
    }

    /// Per-module scratch directory
    pub fn scratch_dir(&self, classname: &str) -> PathBuf {
        self.root.join("scratch").join(classname)
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.root.join("modules")
    }

    pub fn module_archive(&self, classname: &str) -> PathBuf {
        self.modules_dir().join(format!("{classname}.jar"))
    }

    pub fn library_archive(&self) -> PathBuf {
        self.root.join(LIBRARY_ARCHIVE)
    }

    pub fn shared_resources_archive(&self) -> PathBuf {
        self.root.join(SHARED_RESOURCES_ARCHIVE)
    }

    pub fn model_file(&self, application: &str) -> PathBuf {
        self.root.join(model_file_name(application))
    }
}

/// A built module archive and the libraries it was compiled against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleArtifact {
    pub classname: String,
    pub archive: PathBuf,
    pub libraries: Vec<PathBuf>,
}

/// Builds module archives for one bundle
pub struct ModuleBuilder<'a> {
    compiler: &'a dyn Compiler,
    archiver: &'a dyn Archiver,
    bundle: &'a BundleModel,
    layout: &'a BuildLayout,
    shared_config: Option<Element>,
    /// Shared across modules so each source dependency is built once
    resolver: DependencyResolver<'a>,
}

impl<'a> ModuleBuilder<'a> {
    /// Reads the shared configuration once for all modules
    pub fn new(
        compiler: &'a dyn Compiler,
        archiver: &'a dyn Archiver,
        bundle: &'a BundleModel,
        layout: &'a BuildLayout,
    ) -> Result<Self> {
        let shared_config = bundle
            .shared
            .as_ref()
            .and_then(|shared| shared.config_file.as_deref())
            .map(|path| load_config(&bundle.resolve_path(path)))
            .transpose()?;

        Ok(Self {
            compiler,
            archiver,
            bundle,
            layout,
            shared_config,
            resolver: DependencyResolver::new(compiler, archiver, bundle.base_dir.as_deref()),
        })
    }

    /// Build one module into `modules/<classname>.jar`
    pub fn build(&self, module: &ModuleDescriptor) -> Result<ModuleArtifact> {
        let classname = &module.classname;
        let scratch = self.layout.scratch_dir(classname);
        reset_dir(&scratch)?;

        let resolver = &self.resolver;
        let dependencies_dir = self.layout.dependencies_dir();
        let mut libraries = resolver.resolve_all(&module.dependencies, &dependencies_dir)?;
        for archive in resolver.resolve_all(self.bundle.shared_dependencies(), &dependencies_dir)? {
            if !libraries.contains(&archive) {
                libraries.push(archive);
            }
        }

        let classes_dir = scratch.join("classes");
        ensure_dir(&classes_dir)?;
        self.compiler.compile(
            &self.bundle.resolve_path(&module.source_dir),
            &libraries,
            &classes_dir,
        )?;

        let class_archive = scratch.join(format!("{classname}.jar"));
        self.archiver.archive(
            &[ArchiveEntry::directory(&classes_dir, "")],
            &class_archive,
            None,
        )?;

        let mut entries = vec![ArchiveEntry::file(&class_archive)];

        let local_config = module
            .config_file
            .as_deref()
            .map(|path| self.bundle.resolve_path(path));
        if let Some(merged) =
            merge::merge(local_config.as_deref(), self.shared_config.as_ref(), classname)?
        {
            let config_dir = scratch.join("config");
            entries.push(ArchiveEntry::file(merged.write_into(&config_dir)?));
        }

        if let Some(resources) = &module.resources_dir {
            entries.push(ArchiveEntry::directory(
                self.bundle.resolve_path(resources),
                RESOURCES_PREFIX,
            ));
        }

        let archive = self.layout.module_archive(classname);
        self.archiver.archive(&entries, &archive, None)?;
        remove_dir_if_exists(&scratch)?;

        tracing::debug!("Built {}", archive.display());
        Ok(ModuleArtifact {
            classname: classname.clone(),
            archive,
            libraries,
        })
    }
}

#[cfg(test)]
mod tests;
