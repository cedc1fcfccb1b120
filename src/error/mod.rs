//! Error types and handling for Hemera
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`model`]: Bundle and application model document errors
//! - [`build`]: Dependency and module build errors
//! - [`package`]: Bundle packaging errors
//! - [`deploy`]: Deployment errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors

pub mod build;
pub mod config;
pub mod deploy;
pub mod fs;
pub mod model;
pub mod package;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Hemera operations
#[derive(Error, Diagnostic, Debug)]
pub enum HemeraError {
    // Model errors
    #[error("Malformed model document at <{tag}>: {reason}")]
    #[diagnostic(
        code(hemera::model::malformed),
        help("Check the document against the bundle or application model schema")
    )]
    MalformedModel { tag: String, reason: String },

    #[error("Failed to parse document: {path}: {reason}")]
    #[diagnostic(code(hemera::model::parse_failed))]
    DocumentParseFailed { path: String, reason: String },

    // Build errors
    #[error("Failed to build dependency '{dependency}': {reason}")]
    #[diagnostic(code(hemera::build::dependency_failed))]
    DependencyBuildFailed { dependency: String, reason: String },

    #[error("Compilation of '{source_dir}' failed: {diagnostic}")]
    #[diagnostic(code(hemera::build::compile_failed))]
    CompileFailed {
        source_dir: String,
        diagnostic: String,
    },

    #[error("Archive operation on '{path}' failed: {reason}")]
    #[diagnostic(code(hemera::build::archive_failed))]
    ArchiveFailed { path: String, reason: String },

    // Packaging errors
    #[error("Failed to package bundle member '{member}': {reason}")]
    #[diagnostic(code(hemera::package::failed))]
    PackagingFailed { member: String, reason: String },

    // Deploy errors
    #[error("Invalid bundle: {message}")]
    #[diagnostic(
        code(hemera::deploy::validation_failed),
        help("Bundles are produced by 'hemera bundle' and carry the .hab extension")
    )]
    DeployValidationFailed { message: String },

    #[error("Application '{name}' is not deployed")]
    #[diagnostic(code(hemera::deploy::application_not_found))]
    ApplicationNotFound { name: String },

    #[error("Failed to {action} host service: {reason}")]
    #[diagnostic(code(hemera::deploy::service_failed))]
    ServiceControlFailed { action: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(hemera::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(hemera::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(hemera::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(hemera::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(hemera::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(hemera::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(hemera::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for HemeraError {
    fn from(err: std::io::Error) -> Self {
        HemeraError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for HemeraError {
    fn from(err: serde_yaml::Error) -> Self {
        HemeraError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for HemeraError {
    fn from(err: zip::result::ZipError) -> Self {
        HemeraError::ArchiveFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, HemeraError>;
