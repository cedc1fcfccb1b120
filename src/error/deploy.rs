//! Deployment errors

use super::HemeraError;

/// Creates a deploy validation failed error
pub fn validation_failed(message: impl Into<String>) -> HemeraError {
    HemeraError::DeployValidationFailed {
        message: message.into(),
    }
}

/// Creates an application not found error
pub fn application_not_found(name: impl Into<String>) -> HemeraError {
    HemeraError::ApplicationNotFound { name: name.into() }
}

/// Creates a service control failed error
pub fn service_failed(action: impl Into<String>, reason: impl Into<String>) -> HemeraError {
    HemeraError::ServiceControlFailed {
        action: action.into(),
        reason: reason.into(),
    }
}
