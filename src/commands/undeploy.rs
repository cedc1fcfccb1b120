//! Undeploy command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::UndeployArgs;
use crate::commands::helpers::load_host;
use crate::deployer::Deployer;
use crate::error::Result;

/// Remove an installed application
pub fn run(home: Option<PathBuf>, args: UndeployArgs) -> Result<()> {
    let (layout, toolchain) = load_host(home.as_deref())?;
    Deployer::new(
        &layout,
        toolchain.archiver.as_ref(),
        toolchain.controller.as_ref(),
    )
    .undeploy(&args.application)?;

    println!(
        "{} {}",
        Style::new().green().bold().apply_to("Undeployed"),
        args.application
    );
    Ok(())
}
