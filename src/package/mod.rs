//! Bundle assembly
//!
//! A bundle (`<application>.hab`) is a jar-compatible archive holding one
//! archive per module, the optional shared library and shared resources
//! archives, and the serialized application model. Its manifest names every
//! member so the deployer never has to guess.

pub mod manifest;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use manifest::BundleManifest;

use crate::common::fs::file_name_string;
use crate::error::{self, Result};
use crate::model::BUNDLE_EXTENSION;
use crate::toolchain::{ArchiveEntry, Archiver};

/// Files going into a bundle
#[derive(Debug, Clone, Default)]
pub struct BundleInputs {
    pub modules: Vec<PathBuf>,
    pub library: Option<PathBuf>,
    pub shared_resources: Option<PathBuf>,
    pub model: PathBuf,
}

/// An assembled bundle on disk
#[derive(Debug, Clone)]
pub struct BundleArchive {
    pub path: PathBuf,
    pub manifest: BundleManifest,
}

/// Bundle file name for an application
pub fn bundle_file_name(application: &str) -> String {
    format!("{application}.{BUNDLE_EXTENSION}")
}

/// Package all inputs into `target`
///
/// Every input must exist and file names must be unique within the bundle;
/// either violation fails the whole assembly before anything is written.
pub fn assemble(archiver: &dyn Archiver, inputs: &BundleInputs, target: &Path) -> Result<BundleArchive> {
    let all_inputs = inputs
        .modules
        .iter()
        .chain(inputs.library.iter())
        .chain(inputs.shared_resources.iter())
        .chain(std::iter::once(&inputs.model));
    let mut names = HashSet::new();
    for input in all_inputs.clone() {
        let name = file_name_string(input);
        if !input.is_file() {
            return Err(error::package::failed(
                name,
                format!("member file {} is missing", input.display()),
            ));
        }
        if !names.insert(name.clone()) {
            return Err(error::package::failed(
                name.clone(),
                format!("more than one bundle member is named '{name}'"),
            ));
        }
    }

    let mut manifest = BundleManifest::new(
        inputs.modules.iter().map(|path| file_name_string(path)).collect(),
        file_name_string(&inputs.model),
    );
    manifest.lib_jar = inputs.library.as_deref().map(file_name_string);
    manifest.shared_resources = inputs.shared_resources.as_deref().map(file_name_string);

    let entries: Vec<_> = all_inputs.map(ArchiveEntry::file).collect();
    archiver
        .archive(&entries, target, Some(&manifest.to_manifest()))
        .map_err(|e| error::package::failed(file_name_string(target), e.to_string()))?;

    tracing::info!("Assembled bundle {}", target.display());
    Ok(BundleArchive {
        path: target.to_path_buf(),
        manifest,
    })
}
