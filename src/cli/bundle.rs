use clap::Parser;
use std::path::PathBuf;

/// Arguments for the bundle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Build a bundle into ./dist:\n    hemera bundle app.hbm dist\n\n\
                  Build with debug logging:\n    hemera -v bundle app.hbm dist")]
pub struct BundleArgs {
    /// Bundle descriptor (.hbm)
    pub descriptor: PathBuf,

    /// Directory the bundle archive is written to
    pub target_dir: PathBuf,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,
}
