use clap::Parser;
use std::path::PathBuf;

/// Arguments for the deploy command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Deploy into the default home:\n    hemera deploy dist/sample.hab\n\n\
                  Deploy into a specific home:\n    hemera --home /opt/hemera deploy dist/sample.hab")]
pub struct DeployArgs {
    /// Bundle archive (.hab)
    pub bundle: PathBuf,
}
