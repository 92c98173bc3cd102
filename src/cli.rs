//! Command-line interface for the terminal host.

use std::path::PathBuf;

use clap::Parser;

/// Two-combatant ink-brush duel in the terminal
#[derive(Parser, Debug)]
#[command(name = "ink_duel")]
#[command(about = "Two-combatant ink-brush duel in the terminal")]
#[command(version)]
pub struct Args {
    /// Skip the menu and start at this difficulty (easy, medium, hard, grandmaster)
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Seed for the match RNG, for reproducible opponents
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with match presentation settings
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Where cleared difficulties are stored
    #[arg(long, value_name = "PATH")]
    pub progress: Option<PathBuf>,

    /// Log file (stdout belongs to the renderer)
    #[arg(long, value_name = "PATH", default_value = "ink_duel.log")]
    pub log_file: PathBuf,
}

pub fn parse_args() -> Args {
    Args::parse()
}
