//! Hemera - application bundler and deployer
//!
//! Builds multi-module applications described by a bundle descriptor (`.hbm`)
//! into a single bundle archive (`.hab`) and installs bundles into a host
//! directory layout.
//!
//! The build side is driven by [`bundler::Bundler`], the install side by
//! [`deployer::Deployer`]. Both talk to the outside world only through the
//! [`toolchain`] traits.

pub mod builder;
pub mod bundler;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod deployer;
pub mod error;
pub mod model;
pub mod package;
pub mod progress;
pub mod resolver;
pub mod temp;
pub mod toolchain;

#[cfg(test)]
mod test_fixtures;
