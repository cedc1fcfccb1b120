//! Deploy command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::DeployArgs;
use crate::commands::helpers::load_host;
use crate::deployer::{DeployReport, Deployer};
use crate::error::Result;

/// Install a bundle into the host layout
pub fn run(home: Option<PathBuf>, args: DeployArgs) -> Result<()> {
    let (layout, toolchain) = load_host(home.as_deref())?;
    let report = Deployer::new(
        &layout,
        toolchain.archiver.as_ref(),
        toolchain.controller.as_ref(),
    )
    .deploy(&args.bundle)?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &DeployReport) {
    println!(
        "{} {} into {}",
        Style::new().green().bold().apply_to("Deployed"),
        Style::new().bold().yellow().apply_to(&report.application),
        report.app_dir.display()
    );
    println!("  {}", Style::new().bold().apply_to("Modules:"));
    for module in &report.modules {
        println!("    {}", Style::new().cyan().apply_to(module));
    }
    println!(
        "  {} {} installed, {} already present",
        Style::new().bold().apply_to("Libraries:"),
        report.libraries_installed.len(),
        report.libraries_skipped.len()
    );
    for library in &report.libraries_skipped {
        println!("    {}", Style::new().dim().apply_to(library));
    }
}
