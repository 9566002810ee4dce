//! The `cfg` command: print the resolved configuration as JSON, each value
//! paired with its source (default, file, env).

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "starting_chips": {
            "value": config.starting_chips,
            "source": sources.starting_chips,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "turn_timeout_secs": {
            "value": config.turn_timeout_secs,
            "source": sources.turn_timeout_secs,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
