//! Process exit codes used by the `chipstack` binary.

/// The command finished, including games ended with `quit`.
pub const SUCCESS: i32 = 0;

/// Bad arguments, bad configuration or a failed game.
pub const ERROR: i32 = 2;

/// Input ran out while a game was still in progress.
pub const INTERRUPTED: i32 = 130;
