//! Terminal output helpers shared by the commands.

use std::io::Write;

use chipstack_room::{GameOutcome, RoomEvent};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// One line of table output for an event. Private lines are labelled with
/// their owner since everyone shares the terminal.
pub fn format_event(event: &RoomEvent) -> String {
    match event {
        RoomEvent::Public { text, .. } => text.clone(),
        RoomEvent::Private {
            participant, text, ..
        } => format!("[{participant}] {text}"),
        RoomEvent::GameEnded {
            winner: Some(winner),
            ..
        } => format!("Game over. Winner: {winner}"),
        RoomEvent::GameEnded {
            winner: None,
            reason,
            ..
        } => format!("Game over ({reason})."),
    }
}

pub fn format_outcome(outcome: &GameOutcome) -> String {
    match outcome {
        GameOutcome::Winner { participant, hands } => {
            format!("{participant} won after {hands} hand(s).")
        }
        GameOutcome::Terminated { hands, .. } => {
            format!("Game terminated after {hands} hand(s).")
        }
    }
}
