//! Shared library and shared resources archives

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::common::fs::file_name_string;
use crate::error::Result;
use crate::toolchain::{ArchiveEntry, Archiver};

/// Pack library archives into one archive, keeping the first file of each name
///
/// Returns `None` without writing anything when there are no libraries.
pub fn build_library_archive(
    archiver: &dyn Archiver,
    libraries: &[PathBuf],
    target: &Path,
) -> Result<Option<PathBuf>> {
    let mut seen = HashSet::new();
    let entries: Vec<_> = libraries
        .iter()
        .filter(|library| seen.insert(file_name_string(library)))
        .map(ArchiveEntry::file)
        .collect();

    if entries.is_empty() {
        return Ok(None);
    }

    tracing::info!("Packing {} libraries into {}", entries.len(), target.display());
    archiver.archive(&entries, target, None)?;
    Ok(Some(target.to_path_buf()))
}

/// Pack the shared resources directory, if one was declared
pub fn build_resources_archive(
    archiver: &dyn Archiver,
    resources_dir: Option<&Path>,
    target: &Path,
) -> Result<Option<PathBuf>> {
    let Some(dir) = resources_dir else {
        return Ok(None);
    };
    archiver.archive(&[ArchiveEntry::directory(dir, "")], target, None)?;
    Ok(Some(target.to_path_buf()))
}
