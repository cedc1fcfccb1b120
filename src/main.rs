//! Hemera - application bundler and deployer
//!
//! Command line entry point: parses arguments, sets up logging and dispatches
//! to the command implementations.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use hemera::cli::{Cli, Commands};
use hemera::commands;

/// Initialize tracing; `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Bundle(args) => commands::bundle::run(cli.home, args),
        Commands::Deploy(args) => commands::deploy::run(cli.home, args),
        Commands::Undeploy(args) => commands::undeploy::run(cli.home, args),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Version => commands::version::run(cli.home),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
