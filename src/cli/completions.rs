use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  hemera completions bash > ~/.local/share/bash-completion/completions/hemera\n  \
                  hemera completions zsh > ~/.zfunc/_hemera\n  \
                  hemera completions fish > ~/.config/fish/completions/hemera.fish")]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
