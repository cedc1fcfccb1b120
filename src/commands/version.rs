//! Version command implementation

use std::path::PathBuf;

use crate::config::HostLayout;
use crate::error::Result;
use crate::model::{BUNDLE_EXTENSION, MODEL_EXTENSION};

/// Print version, build and host information
pub fn run(home: Option<PathBuf>) -> Result<()> {
    println!("hemera {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", if cfg!(debug_assertions) { "debug" } else { "release" });
    println!("  Formats: .{BUNDLE_EXTENSION} bundles, .{MODEL_EXTENSION} application models");

    let layout = HostLayout::resolve(home.as_deref())?;
    let settings = layout.settings_file();
    println!();
    println!("Host:");
    println!("  Home: {}", layout.home().display());
    println!(
        "  Settings: {}{}",
        settings.display(),
        if settings.is_file() { "" } else { " (not present, using defaults)" }
    );
    Ok(())
}
