//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Texas Hold'em table engine: simulate hands and rank showdowns"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play hands at one table with a seeded random policy
    Sim {
        /// Number of seats (defaults to the configured value)
        #[arg(long)]
        players: Option<usize>,
        #[arg(long, default_value_t = 10)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
        /// Append hand records to this JSONL file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Classify and rank hands given as NAME=CARDS (5 to 7 cards each)
    Rank {
        #[arg(long = "hand", required = true)]
        hands: Vec<String>,
    },
    /// Print the resolved configuration with the source of each value
    Cfg,
}
