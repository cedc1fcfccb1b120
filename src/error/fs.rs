//! File system errors

use std::path::Path;

use super::HemeraError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> HemeraError {
    HemeraError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read failed error
pub fn read_failed(path: &Path, err: impl ToString) -> HemeraError {
    HemeraError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, err: impl ToString) -> HemeraError {
    HemeraError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> HemeraError {
    HemeraError::IoError {
        message: message.into(),
    }
}
