//! # Hold'em CLI Library
//!
//! Command-line front end for the hold'em table engine. The [`run`] function
//! parses arguments and dispatches to a subcommand:
//!
//! - `sim`: play hands at one table with a random policy and print standings
//! - `rank`: classify and rank hands given as `NAME=CARDS`
//! - `cfg`: show the resolved configuration and where each value came from
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "sim", "--players", "3", "--hands", "10", "--seed", "7"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{handle_cfg_command, handle_rank_command, handle_sim_command};

pub use error::CliError;

/// Parses `args` and runs the selected command.
///
/// Returns [`exit_code::SUCCESS`] or [`exit_code::ERROR`]. Help and version
/// output go to `out`; usage errors go to `err` followed by the command list.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["sim", "rank", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err, "Usage: holdem <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Sim {
            players,
            hands,
            seed,
            output,
        } => handle_sim_command(players, hands, seed, output, out, err),
        Commands::Rank { hands } => handle_rank_command(&hands, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    };
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
