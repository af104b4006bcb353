use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    version,
    about = "Roster: a terminal list of user profile cards with a detail view"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Never fetch remote avatars; show placeholders only
    #[arg(long = "no-fetch", global = true)]
    pub no_fetch: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive TUI (the default when no command is given)
    Tui,
    /// Print the roster to stdout without the TUI
    List,
    /// Manage the config file
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Show the config file contents
    Show,
    /// Print the config file path
    Path,
    /// Write the default config
    Reset,
    /// Set a single key
    Set { key: String, value: String },
    /// Get a single key
    Get { key: String },
}
