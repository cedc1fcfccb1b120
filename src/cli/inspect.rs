use clap::Parser;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the application model a descriptor generates:\n    hemera inspect app.hbm\n\n\
                  Show the manifest of a bundle:\n    hemera inspect dist/sample.hab")]
pub struct InspectArgs {
    /// Bundle descriptor (.hbm) or bundle archive (.hab)
    pub path: PathBuf,
}
