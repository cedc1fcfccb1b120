//! Shell completions command

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::Result;

/// Write completions for the requested shell to stdout
pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout().lock());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use clap_complete::Shell;

    #[test]
    fn test_completions_every_shell() {
        for shell in [Shell::Bash, Shell::Elvish, Shell::Fish, Shell::PowerShell, Shell::Zsh] {
            assert!(run(CompletionsArgs { shell }).is_ok());
        }
    }

    #[test]
    fn test_shell_parsing_ignores_case() {
        let cli = Cli::try_parse_from(["hemera", "completions", "ZSH"]).unwrap();
        match cli.command {
            crate::cli::Commands::Completions(args) => assert_eq!(args.shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_unknown_shell_is_rejected() {
        assert!(Cli::try_parse_from(["hemera", "completions", "tcsh"]).is_err());
    }
}
