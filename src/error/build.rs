//! Dependency and module build errors

use super::HemeraError;

/// Creates a dependency build failed error
pub fn dependency_failed(dependency: impl Into<String>, reason: impl Into<String>) -> HemeraError {
    HemeraError::DependencyBuildFailed {
        dependency: dependency.into(),
        reason: reason.into(),
    }
}

/// Creates a compile failed error carrying the compiler diagnostic
pub fn compile_failed(source_dir: impl Into<String>, diagnostic: impl Into<String>) -> HemeraError {
    HemeraError::CompileFailed {
        source_dir: source_dir.into(),
        diagnostic: diagnostic.into(),
    }
}

/// Creates an archive failed error
pub fn archive_failed(path: impl Into<String>, reason: impl Into<String>) -> HemeraError {
    HemeraError::ArchiveFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
