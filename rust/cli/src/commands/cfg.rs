//! `cfg` command: resolved configuration with the source of every value.
//!
//! ```json
//! {
//!   "players": { "value": 5, "source": "default" },
//!   "seed": { "value": 42, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "players": { "value": config.players, "source": sources.players },
        "seed": { "value": config.seed, "source": sources.seed },
        "tokens": { "value": config.tokens, "source": sources.tokens },
        "small_blind": { "value": config.small_blind, "source": sources.small_blind },
        "blind_increase": { "value": config.blind_increase, "source": sources.blind_increase },
        "turn_seconds": { "value": config.turn_seconds, "source": sources.turn_seconds },
        "timeout_policy": { "value": config.timeout_policy, "source": sources.timeout_policy }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
