//! Common file system operations with unified error handling

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{self, Result};

/// Create a directory and all of its parents
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| error::fs::write_failed(path, e))
}

/// Create the parent directory of a file path if it has one
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Remove a directory tree; a missing directory is not an error
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| error::fs::write_failed(path, e))?;
    }
    Ok(())
}

/// Remove a file; a missing file is not an error
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        fs::remove_file(path).map_err(|e| error::fs::write_failed(path, e))?;
    }
    Ok(())
}

/// Wipe a directory and recreate it empty
pub fn reset_dir(path: &Path) -> Result<()> {
    remove_dir_if_exists(path)?;
    ensure_dir(path)
}

/// Files directly under `dir` whose extension matches `extension`, sorted by name
///
/// Subdirectories are not descended into.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(error::fs::not_found(dir));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| error::fs::read_failed(dir, e))? {
        let path = entry.map_err(|e| error::fs::read_failed(dir, e))?.path();
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File name of a path as an owned string
pub fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
