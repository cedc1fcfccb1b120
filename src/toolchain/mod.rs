//! External tool seams
//!
//! The pipeline never shells out or touches archive formats directly. It goes
//! through three capabilities:
//!
//! - [`Compiler`] turns a source directory into class files
//! - [`Archiver`] creates, inspects and extracts jar-compatible archives
//! - [`ServiceController`] stops and starts the host service around a deploy
//!
//! [`Toolchain`] bundles the real implementations configured from
//! [`ToolSettings`](crate::config::ToolSettings); tests substitute fakes.

pub mod archive;
pub mod compiler;
pub mod manifest;
pub mod service;

use std::path::{Path, PathBuf};

pub use archive::ZipArchiver;
pub use compiler::CommandCompiler;
pub use manifest::{MANIFEST_PATH, Manifest};
pub use service::{NoopController, ScriptController};

use crate::config::ToolSettings;
use crate::error::Result;

/// Compiles a source directory against a classpath
pub trait Compiler {
    /// Compile every source under `source_dir` into `output_dir`
    ///
    /// Returns the produced class files. A failed compilation surfaces the
    /// tool's diagnostic output verbatim.
    fn compile(
        &self,
        source_dir: &Path,
        classpath: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>>;
}

/// Something to put into an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEntry {
    /// A single file stored under `name`
    File { path: PathBuf, name: String },
    /// Every file below `path`, stored under `prefix` (empty prefix means the archive root)
    Directory { path: PathBuf, prefix: String },
}

impl ArchiveEntry {
    /// A file stored under its own file name
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = crate::common::fs::file_name_string(&path);
        Self::File { path, name }
    }

    pub fn directory(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self::Directory {
            path: path.into(),
            prefix: prefix.into(),
        }
    }
}

/// Creates, inspects and extracts archives
pub trait Archiver {
    /// Write `entries` (and an optional manifest) into a new archive at `target`
    fn archive(&self, entries: &[ArchiveEntry], target: &Path, manifest: Option<&Manifest>)
    -> Result<()>;

    /// The archive's manifest, if it has one
    fn read_manifest(&self, archive: &Path) -> Result<Option<Manifest>>;

    /// Names of all file members, in archive order
    fn list_members(&self, archive: &Path) -> Result<Vec<String>>;

    /// Extract one member into the file `target`
    fn extract_member(&self, archive: &Path, member: &str, target: &Path) -> Result<()>;

    /// Extract every file member below `destination`; returns the written files
    fn extract_all(&self, archive: &Path, destination: &Path) -> Result<Vec<PathBuf>>;
}

/// Controls the host service that runs deployed applications
pub trait ServiceController {
    fn stop(&self) -> Result<()>;

    fn start(&self) -> Result<()>;

    fn restart(&self) -> Result<()> {
        self.stop()?;
        self.start()
    }
}

/// The concrete tools used by the pipeline
pub struct Toolchain {
    pub compiler: Box<dyn Compiler>,
    pub archiver: Box<dyn Archiver>,
    pub controller: Box<dyn ServiceController>,
}

impl Toolchain {
    /// Real tools configured from settings
    pub fn from_settings(settings: &ToolSettings) -> Self {
        let controller: Box<dyn ServiceController> = match &settings.service.script {
            Some(script) => Box::new(ScriptController::new(script.clone())),
            None => Box::new(NoopController),
        };

        Self {
            compiler: Box::new(CommandCompiler::new(
                settings.compiler.program.clone(),
                settings.compiler.args.clone(),
            )),
            archiver: Box::new(ZipArchiver),
            controller,
        }
    }
}
