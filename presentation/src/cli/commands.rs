//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for parley
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(author, version, about = "Chat with a language model from the terminal, with durable sessions")]
#[command(long_about = r#"
Parley talks to an OpenAI-compatible chat completion API and caches
conversations on disk, so a chat can be resumed across invocations with
the persona it was started with. The reserved id "temp" never persists.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./parley.toml       Project-level config
3. ~/.config/parley/config.toml   Global config

Example:
  parley "How do I tail a file in Rust?"
  parley --chat rust-help "And follow it across rotations?"
  parley --repl rust-help
  parley --repl -ls
  parley --shell "compress every png in this directory"
"#)]
pub struct Cli {
    /// The prompt to send (with --repl, folded into the first turn)
    pub prompt: Option<String>,

    /// Continue (or start) the named chat session
    #[arg(long, value_name = "ID")]
    pub chat: Option<String>,

    /// Enter the interactive REPL bound to a session id
    /// (-ls to pick or create, -sa to search, -dl to delete)
    #[arg(long, value_name = "ID", allow_hyphen_values = true)]
    pub repl: Option<String>,

    /// Persona for this conversation
    #[arg(long, value_name = "NAME")]
    pub role: Option<String>,

    /// Shorthand for --role code
    #[arg(long, conflicts_with = "role")]
    pub code: bool,

    /// Shorthand for --role shell
    #[arg(long, conflicts_with_all = ["role", "code"])]
    pub shell: bool,

    /// Shorthand for --role describe-shell
    #[arg(long = "describe-shell", conflicts_with_all = ["role", "code", "shell"])]
    pub describe_shell: bool,

    /// List stored chat ids, oldest interaction first
    #[arg(long)]
    pub list_chats: bool,

    /// Print the stored history of a chat id
    #[arg(long, value_name = "ID")]
    pub show_chat: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The persona name chosen via --role or a shorthand flag.
    pub fn role_name(&self) -> Option<&str> {
        if self.code {
            Some("code")
        } else if self.shell {
            Some("shell")
        } else if self.describe_shell {
            Some("describe-shell")
        } else {
            self.role.as_deref()
        }
    }
}
