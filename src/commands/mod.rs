//! Command implementations for Hemera CLI

pub mod bundle;
pub mod completions;
pub mod deploy;
pub mod helpers;
pub mod inspect;
pub mod undeploy;
pub mod version;
