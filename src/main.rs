mod avatar;
mod cli;
mod config;
mod model;
mod router;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigCmd};
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::GlobalConfig::load();
    // CLI flag wins over the config file.
    if cli.no_fetch {
        cfg.fetch_avatars = false;
    }

    match cli.command {
        None | Some(Commands::Tui) => tui::launch_tui(&cfg).await,
        Some(Commands::List) => {
            print_roster();
            Ok(())
        }
        Some(Commands::Config { cmd }) => handle_config(cmd),
    }
}

fn print_roster() {
    for profile in model::ROSTER.iter() {
        if profile.online {
            println!(
                "{} {} ({})",
                "●".green(),
                profile.name,
                profile.status_label().green()
            );
        } else {
            println!(
                "{} {} ({})",
                "○".red(),
                profile.name.dimmed(),
                profile.status_label().red()
            );
        }
    }
}

fn handle_config(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Show => config::show_config(),
        ConfigCmd::Path => println!("{}", config::config_path().display()),
        ConfigCmd::Reset => {
            config::reset_config()?;
            println!("[config] Wrote defaults to {}", config::config_path().display());
        }
        ConfigCmd::Set { key, value } => config::set_config_key(&key, &value),
        ConfigCmd::Get { key } => match config::get_config_key(&key) {
            Some(val) => println!("{}", val.trim()),
            None => println!("[config] Key not set: {key}"),
        },
    }
    Ok(())
}
