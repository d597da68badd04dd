//! helpdesk - Terminal help desk
//!
//! Requesters open tickets, technicians triage and resolve them,
//! administrators read the reports. All records live in memory for the
//! lifetime of the process; only the config file touches disk.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "helpdesk")]
#[command(about = "Terminal help desk for requesters, technicians and administrators")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start with an empty desk instead of the demo dataset
    #[arg(long)]
    no_seed: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Output JSON schema for the config file
    Schema,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Reset to default configuration
    Reset,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Config { command }) => match command {
            Some(ConfigCommands::Reset) => commands::config_reset(cli.config.as_deref()),
            Some(ConfigCommands::Show) | None => commands::config_show(cli.config.as_deref()),
        },
        Some(Commands::Schema) => commands::schema(),
        None => session::run(cli.config.as_deref(), cli.no_seed),
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
