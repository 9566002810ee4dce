use chipstack_engine::errors::GameError;
use chipstack_engine::player::ParticipantId;
use thiserror::Error;

use crate::settings::SettingsError;

/// Failures at the command boundary of a room.
///
/// Engine errors pass through unchanged so the acting player sees exactly why
/// a bet was refused; nothing about the table changes when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error("It is not {participant}'s turn")]
    WrongTurn {
        participant: ParticipantId,
        expected: Option<ParticipantId>,
    },
    #[error("A game is already running in this room")]
    GameAlreadyRunning,
    #[error("No game is running in this room")]
    NoActiveGame,
    #[error("{0} is not seated at this table")]
    UnknownParticipant(ParticipantId),
    #[error(transparent)]
    Engine(#[from] GameError),
    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),
    #[error("Game task failed: {0}")]
    TaskFailed(String),
}

impl RoomError {
    /// Errors the acting player can fix by sending a different command.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RoomError::WrongTurn { .. }
                | RoomError::UnknownParticipant(_)
                | RoomError::Engine(GameError::InsufficientChips { .. })
                | RoomError::Engine(GameError::BelowMinimum { .. })
        )
    }
}
