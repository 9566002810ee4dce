//! Betting actions, applied on behalf of whoever holds the turn.
//!
//! Each handler validates completely before touching any chips, narrates the
//! action through the table's notifier and passes the turn on. Turn
//! legality (is the caller the current player?) is the caller's job.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::ParticipantId;
use crate::table::Table;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActionKind {
    Check,
    Call,
    Bet,
    Fold,
    AllIn,
}

/// What a handler did, for the caller to log or display.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub participant: ParticipantId,
    pub kind: ActionKind,
    /// Chips moved into the pot by this action
    pub amount: u32,
    pub all_in: bool,
}

impl Table {
    fn acting_seat(&self) -> Result<usize, GameError> {
        if self.betting_complete().is_some() {
            return Err(GameError::BettingClosed);
        }
        self.pending_players
            .get(self.pending_index)
            .copied()
            .ok_or(GameError::NoPendingPlayer)
    }

    /// Chips the current player still has to put in to match the minimum.
    pub fn owed(&self) -> u32 {
        self.current_player()
            .map(|p| self.min_bet.saturating_sub(p.betted()))
            .unwrap_or(0)
    }

    /// Match the minimum bet, going all-in when the stack does not cover it.
    pub fn call(&mut self) -> Result<ActionReport, GameError> {
        let seat = self.acting_seat()?;
        let owed = self.min_bet.saturating_sub(self.players()[seat].betted());
        let chips = self.players()[seat].chips();
        let (amount, all_in) = if owed >= chips {
            (chips, true)
        } else {
            (owed, false)
        };
        let kind = match (all_in, amount) {
            (true, _) => ActionKind::AllIn,
            (false, 0) => ActionKind::Check,
            _ => ActionKind::Call,
        };
        Ok(self.apply(seat, kind, amount, all_in))
    }

    /// Commit `amount` more chips. Anything above what is owed raises the
    /// minimum everyone else must match.
    pub fn bet(&mut self, amount: u32) -> Result<ActionReport, GameError> {
        let seat = self.acting_seat()?;
        let p = &self.players()[seat];
        let owed = self.min_bet.saturating_sub(p.betted());
        if amount > p.chips() {
            return Err(GameError::InsufficientChips {
                amount,
                chips: p.chips(),
            });
        }
        if amount < owed {
            return Err(GameError::BelowMinimum {
                amount,
                minimum: owed,
            });
        }
        let all_in = amount == p.chips();
        let kind = if all_in {
            ActionKind::AllIn
        } else if amount == 0 {
            ActionKind::Check
        } else if amount == owed {
            ActionKind::Call
        } else {
            ActionKind::Bet
        };
        Ok(self.apply(seat, kind, amount, all_in))
    }

    /// Give up the hand. Chips already in the pot stay there.
    pub fn fold(&mut self) -> Result<ActionReport, GameError> {
        let seat = self.acting_seat()?;
        Ok(self.apply(seat, ActionKind::Fold, 0, false))
    }

    /// Commit the whole remaining stack regardless of the minimum.
    pub fn all_in(&mut self) -> Result<ActionReport, GameError> {
        let seat = self.acting_seat()?;
        let chips = self.players()[seat].chips();
        Ok(self.apply(seat, ActionKind::AllIn, chips, true))
    }

    fn apply(&mut self, seat: usize, kind: ActionKind, amount: u32, all_in: bool) -> ActionReport {
        let p = self.player_mut(seat);
        p.turn_pending = false;
        let paid = if kind == ActionKind::Fold {
            p.not_folded = false;
            0
        } else {
            let paid = p.commit(amount);
            if all_in {
                p.all_in = true;
            }
            paid
        };
        let betted = p.betted();
        let participant = p.id().clone();

        self.pot += paid;
        self.min_bet = self.min_bet.max(betted);

        let text = match kind {
            ActionKind::Check => format!("{participant} checks."),
            ActionKind::Call => format!("{participant} calls with {paid} chips."),
            ActionKind::Bet => format!("{participant} bets {paid} chips."),
            ActionKind::Fold => format!("{participant} folds."),
            ActionKind::AllIn => format!("{participant} goes all in with {paid} chips!"),
        };
        self.notifier.send_public(text);
        tracing::debug!(participant = %participant, ?kind, amount = paid, pot = self.pot, "action applied");

        self.advance_turn();
        ActionReport {
            participant,
            kind,
            amount: paid,
            all_in,
        }
    }
}
