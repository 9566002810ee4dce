use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The deck ran out. Never expected with a 52-card deck and at most
    /// 23 seats; reaching it means the dealing logic is broken.
    #[error("Insufficient cards in deck: requested {requested}, remaining {remaining}")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("Insufficient chips: tried to commit {amount}, only {chips} left")]
    InsufficientChips { amount: u32, chips: u32 },
    #[error("Bet of {amount} is below the minimum of {minimum}")]
    BelowMinimum { amount: u32, minimum: u32 },
    #[error("At least two participants are required, got {0}")]
    NotEnoughPlayers(usize),
    #[error("Participant {0} is seated twice")]
    DuplicateParticipant(String),
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
    #[error("Betting for this street is already over")]
    BettingClosed,
    #[error("No player is owed a turn")]
    NoPendingPlayer,
}
