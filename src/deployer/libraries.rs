//! Shared library installation

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::fs::{ensure_dir, file_name_string};
use crate::error::{self, Result};

/// Names of libraries copied and skipped by [`install_libraries`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryInstall {
    pub installed: Vec<String>,
    pub skipped: Vec<String>,
}

/// Copy libraries into `lib_dir` unless a file of the same name is already there
///
/// Same-named libraries are assumed identical; contents are not compared.
pub fn install_libraries(libraries: &[PathBuf], lib_dir: &Path) -> Result<LibraryInstall> {
    ensure_dir(lib_dir)?;
    let mut result = LibraryInstall::default();

    for library in libraries {
        let name = file_name_string(library);
        let target = lib_dir.join(&name);
        if target.exists() {
            tracing::debug!("Library {name} already installed, skipping");
            result.skipped.push(name);
            continue;
        }

        fs::copy(library, &target).map_err(|e| error::fs::write_failed(&target, e))?;
        tracing::debug!("Installed library {name}");
        result.installed.push(name);
    }

    Ok(result)
}
