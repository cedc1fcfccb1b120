//! Dependency resolution
//!
//! Turns [`Dependency`] declarations into archive files usable on a classpath:
//! - `jar-dir` dependencies list the archives directly inside the directory
//! - `src-dir` dependencies are compiled and archived into one file whose name
//!   is derived from the declared path, so resolving the same source path twice
//!   always yields the same archive name
//!
//! Two different source directories whose declared paths map to the same
//! archive name are rejected rather than sharing one archive.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::fs::{
    ensure_dir, file_name_string, list_files_with_extension, remove_dir_if_exists,
};
use crate::error::{self, Result};
use crate::model::Dependency;
use crate::model::dependency::source_archive_name;
use crate::toolchain::{ArchiveEntry, Archiver, Compiler};

/// Extension of library archives
pub const ARCHIVE_EXTENSION: &str = "jar";

/// Resolves dependencies with the given tools
pub struct DependencyResolver<'a> {
    compiler: &'a dyn Compiler,
    archiver: &'a dyn Archiver,
    base_dir: Option<&'a Path>,
    /// Archive built during this run -> source directory it was built from
    built: RefCell<HashMap<PathBuf, PathBuf>>,
}

impl<'a> DependencyResolver<'a> {
    /// `base_dir` anchors relative dependency paths (the descriptor's directory)
    pub fn new(
        compiler: &'a dyn Compiler,
        archiver: &'a dyn Archiver,
        base_dir: Option<&'a Path>,
    ) -> Self {
        Self {
            compiler,
            archiver,
            base_dir,
            built: RefCell::new(HashMap::new()),
        }
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        match self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Resolve one dependency into archive files
    ///
    /// Source dependencies are built into `temp_dir`. An archive this resolver
    /// already built from the same source directory is reused instead of
    /// compiling again.
    pub fn resolve(&self, dependency: &Dependency, temp_dir: &Path) -> Result<Vec<PathBuf>> {
        let wrap = |err: error::HemeraError| {
            error::build::dependency_failed(dependency.to_string(), err.to_string())
        };

        match dependency {
            Dependency::ArchiveDirectory { path } => {
                let dir = self.absolute(path);
                let archives = list_files_with_extension(&dir, ARCHIVE_EXTENSION).map_err(wrap)?;
                if archives.is_empty() {
                    return Err(error::build::dependency_failed(
                        dependency.to_string(),
                        format!("no .{ARCHIVE_EXTENSION} archives in {}", dir.display()),
                    ));
                }
                tracing::debug!("{} archives found in {}", archives.len(), dir.display());
                Ok(archives)
            }
            Dependency::SourceDirectory { path, lib_dir } => {
                let target = temp_dir.join(source_archive_name(path));
                let source_dir = self.absolute(path);
                let source_key =
                    fs::canonicalize(&source_dir).unwrap_or_else(|_| source_dir.clone());
                if let Some(built_from) = self.built.borrow().get(&target) {
                    if *built_from != source_key {
                        return Err(error::build::dependency_failed(
                            dependency.to_string(),
                            format!(
                                "archive name {} is already used by {}",
                                file_name_string(&target),
                                built_from.display()
                            ),
                        ));
                    }
                    if target.is_file() {
                        tracing::debug!("Reusing {}", target.display());
                        return Ok(vec![target]);
                    }
                }

                let classpath = match lib_dir {
                    Some(lib_dir) => {
                        list_files_with_extension(&self.absolute(lib_dir), ARCHIVE_EXTENSION)
                            .map_err(wrap)?
                    }
                    None => Vec::new(),
                };

                self.build_source(&source_dir, &classpath, &target)
                    .map_err(wrap)?;
                self.built.borrow_mut().insert(target.clone(), source_key);
                Ok(vec![target])
            }
        }
    }

    /// Resolve several dependencies; archives keep declaration order
    pub fn resolve_all(&self, dependencies: &[Dependency], temp_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut archives = Vec::new();
        for dependency in dependencies {
            for archive in self.resolve(dependency, temp_dir)? {
                if !archives.contains(&archive) {
                    archives.push(archive);
                }
            }
        }
        Ok(archives)
    }

    fn build_source(&self, source_dir: &Path, classpath: &[PathBuf], target: &Path) -> Result<()> {
        let classes_dir = target.with_extension("classes");
        remove_dir_if_exists(&classes_dir)?;

        tracing::info!("Building dependency {}", source_dir.display());
        self.compiler.compile(source_dir, classpath, &classes_dir)?;
        ensure_dir(&classes_dir)?;
        self.archiver
            .archive(&[ArchiveEntry::directory(&classes_dir, "")], target, None)?;

        remove_dir_if_exists(&classes_dir)
    }
}
