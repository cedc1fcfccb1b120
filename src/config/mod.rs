//! Configuration handling for Hemera
//!
//! This module contains:
//! - [`HostLayout`] - directory layout of a host installation
//! - [`ToolSettings`] - `hemera.yaml` with external tool settings
//! - [`merge`] - module configuration merging with the shared configuration

pub mod layout;
pub mod merge;
pub mod settings;

pub use layout::{HOME_ENV, HostLayout};
pub use merge::MergedConfig;
pub use settings::{CompilerSettings, ServiceSettings, ToolSettings};
