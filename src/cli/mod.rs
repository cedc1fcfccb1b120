//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - bundle: Bundle command arguments
//! - deploy: Deploy command arguments
//! - undeploy: Undeploy command arguments
//! - inspect: Inspect command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub mod bundle;
pub mod completions;
pub mod deploy;
pub mod inspect;
pub mod undeploy;

pub use bundle::BundleArgs;
pub use completions::CompletionsArgs;
pub use deploy::DeployArgs;
pub use inspect::InspectArgs;
pub use undeploy::UndeployArgs;

/// Hemera - application bundler and deployer
///
/// Build multi-module applications into a single bundle and install bundles into a host.
#[derive(Parser, Debug)]
#[command(
    name = "hemera",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Build and deploy multi-module application bundles",
    long_about = "Hemera compiles the modules declared in a bundle descriptor (.hbm), packages them \
                  together with their shared libraries and a generated application model into one \
                  bundle (.hab), and installs bundles into a host directory layout.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  hemera bundle app.hbm dist             \x1b[90m# Build dist/<app>.hab\x1b[0m\n   \
                  hemera deploy dist/sample.hab          \x1b[90m# Install into the host\x1b[0m\n   \
                  hemera undeploy sample                 \x1b[90m# Remove an installed application\x1b[0m\n   \
                  hemera inspect app.hbm                 \x1b[90m# Print the generated application model\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Host home directory (defaults to ~/.hemera)
    #[arg(long, short = 'H', global = true, env = "HEMERA_HOME")]
    pub home: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a bundle from a descriptor
    Bundle(BundleArgs),

    /// Install a bundle into the host
    Deploy(DeployArgs),

    /// Remove an installed application
    Undeploy(UndeployArgs),

    /// Show a descriptor's application model or a bundle's manifest
    Inspect(InspectArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_bundle() {
        let cli = Cli::try_parse_from(["hemera", "bundle", "app.hbm", "dist"]).unwrap();
        match cli.command {
            Commands::Bundle(args) => {
                assert_eq!(args.descriptor, PathBuf::from("app.hbm"));
                assert_eq!(args.target_dir, PathBuf::from("dist"));
                assert!(!args.no_progress);
            }
            _ => panic!("Expected Bundle command"),
        }
    }

    #[test]
    fn test_cli_parsing_bundle_requires_target() {
        assert!(Cli::try_parse_from(["hemera", "bundle", "app.hbm"]).is_err());
    }

    #[test]
    fn test_cli_parsing_deploy() {
        let cli = Cli::try_parse_from(["hemera", "deploy", "sample.hab"]).unwrap();
        match cli.command {
            Commands::Deploy(args) => assert_eq!(args.bundle, PathBuf::from("sample.hab")),
            _ => panic!("Expected Deploy command"),
        }
    }

    #[test]
    fn test_cli_parsing_undeploy() {
        let cli = Cli::try_parse_from(["hemera", "undeploy", "sample"]).unwrap();
        match cli.command {
            Commands::Undeploy(args) => assert_eq!(args.application, "sample"),
            _ => panic!("Expected Undeploy command"),
        }
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["hemera", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli =
            Cli::try_parse_from(["hemera", "-vv", "-H", "/opt/hemera", "inspect", "app.hbm"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.home, Some(PathBuf::from("/opt/hemera")));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["hemera", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, clap_complete::Shell::Bash);
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
