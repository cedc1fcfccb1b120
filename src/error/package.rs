//! Bundle packaging errors

use super::HemeraError;

/// Creates a packaging failed error for a bundle member
pub fn failed(member: impl Into<String>, reason: impl Into<String>) -> HemeraError {
    HemeraError::PackagingFailed {
        member: member.into(),
        reason: reason.into(),
    }
}
