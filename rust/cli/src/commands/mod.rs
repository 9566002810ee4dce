//! One module per subcommand. Handlers take their output streams as
//! parameters and report failures as [`CliError`](crate::error::CliError).

mod cfg;
mod play;

pub use cfg::handle_cfg_command;
pub use play::{PlayArgs, handle_play_command};
