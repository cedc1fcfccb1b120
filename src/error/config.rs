//! Configuration errors

use super::HemeraError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> HemeraError {
    HemeraError::ConfigNotFound { path: path.into() }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> HemeraError {
    HemeraError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> HemeraError {
    HemeraError::ConfigInvalid {
        message: message.into(),
    }
}
