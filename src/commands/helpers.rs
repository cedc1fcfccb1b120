//! Command helper utilities

use std::path::Path;

use crate::config::{HostLayout, ToolSettings};
use crate::error::Result;
use crate::toolchain::Toolchain;

/// Resolve the host layout and build the configured toolchain
///
/// The home directory comes from `--home`, then `HEMERA_HOME`, then `~/.hemera`.
/// Tool settings are read from `<home>/config/hemera.yaml` when present.
pub fn load_host(home: Option<&Path>) -> Result<(HostLayout, Toolchain)> {
    let layout = HostLayout::resolve(home)?;
    tracing::debug!("Using home {}", layout.home().display());

    let settings = ToolSettings::load(&layout.settings_file())?;
    Ok((layout, Toolchain::from_settings(&settings)))
}
