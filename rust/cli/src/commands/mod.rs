//! Command handlers, one module per subcommand.
//!
//! Every handler takes its parsed arguments plus the output and error
//! streams, and returns `Result<(), CliError>`; the caller maps errors to
//! exit code 2.

pub mod cfg;
pub mod rank;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use rank::handle_rank_command;
pub use sim::handle_sim_command;
