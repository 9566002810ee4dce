//! # chipstack CLI Library
//!
//! Command-line front end for the chipstack Hold'em rooms. Players share one
//! terminal and type their actions in turn.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to the subcommand and returns the
//! process exit code. [`run_with_input`] does the same with caller-supplied
//! input, which is how the tests script whole games.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["chipstack", "play", "--players", "ann,bob", "--seed", "7"];
//! let code = chipstack_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Seat the players and play until one stack remains
//! - `cfg`: Display the resolved configuration and its sources

use clap::Parser;
use std::io::{BufRead, Write};
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{ChipstackCli, Commands};
use commands::{PlayArgs, handle_cfg_command, handle_play_command};

pub use error::CliError;

/// Main entry point for the CLI application, reading game input from stdin.
///
/// Exit code: `0` for success, `2` for errors, `130` when input ends before
/// the game does.
///
/// # Example
///
/// ```
/// use std::io;
/// let code = chipstack_cli::run(vec!["chipstack", "--help"], &mut io::sink(), &mut io::sink());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// Like [`run`], with game input read from `input` instead of stdin.
pub fn run_with_input<I, S>(
    args: I,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match ChipstackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Usage: chipstack <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    let _ = writeln!(err, "\nFor full help, run: chipstack --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Play {
            players,
            chips,
            small_blind,
            seed,
            turn_timeout,
        } => handle_play_command(
            PlayArgs {
                players,
                chips,
                small_blind,
                seed,
                turn_timeout,
            },
            input,
            out,
            err,
        ),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            e.exit_code()
        }
    }
}
