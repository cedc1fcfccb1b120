//! Model document errors

use super::HemeraError;

/// Creates a malformed model error naming the offending tag
pub fn malformed(tag: impl Into<String>, reason: impl Into<String>) -> HemeraError {
    HemeraError::MalformedModel {
        tag: tag.into(),
        reason: reason.into(),
    }
}

/// Creates a document parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> HemeraError {
    HemeraError::DocumentParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
