//! Bundle command implementation

use std::path::PathBuf;

use console::{Style, Term};

use crate::bundler::Bundler;
use crate::cli::BundleArgs;
use crate::commands::helpers::load_host;
use crate::error::Result;

/// Build a bundle archive from a descriptor
pub fn run(home: Option<PathBuf>, args: BundleArgs) -> Result<()> {
    let (layout, toolchain) = load_host(home.as_deref())?;
    let show_progress = !args.no_progress && Term::stderr().is_term();

    let bundle = Bundler::new(&layout, toolchain.compiler.as_ref(), toolchain.archiver.as_ref())
        .with_progress(show_progress)
        .bundle(&args.descriptor, &args.target_dir)?;

    println!(
        "{} {} ({} modules)",
        Style::new().green().bold().apply_to("Bundled"),
        bundle.path.display(),
        bundle.manifest.modules.len()
    );
    Ok(())
}
