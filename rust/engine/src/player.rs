use std::fmt;

use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Opaque identity of the participant sitting in a seat.
/// The engine never interprets it beyond equality and display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Seat role for the current hand, recomputed at every preflop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum SeatRole {
    /// Dealer button (three or more seats)
    Dealer,
    /// Posts the small blind
    SmallBlind,
    /// Posts the big blind
    BigBlind,
    /// Heads-up only: dealer who also posts the small blind
    SmallDealer,
    Normal,
}

/// Per-seat state for one game. Chips persist across hands; the betting
/// fields are transient.
#[derive(Debug, Clone)]
pub struct Player {
    id: ParticipantId,
    chips: u32,
    role: SeatRole,
    /// Chips committed during the current street
    pub(crate) betted: u32,
    /// Still owed a turn this street
    pub(crate) turn_pending: bool,
    pub(crate) all_in: bool,
    /// Cleared on fold, restored only at the start of the next hand
    pub(crate) not_folded: bool,
    hole: Option<[Card; 2]>,
}

impl Player {
    pub fn new(id: ParticipantId, chips: u32) -> Self {
        Self {
            id,
            chips,
            role: SeatRole::Normal,
            betted: 0,
            turn_pending: false,
            all_in: false,
            not_folded: true,
            hole: None,
        }
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn role(&self) -> SeatRole {
        self.role
    }
    pub fn betted(&self) -> u32 {
        self.betted
    }
    pub fn turn_pending(&self) -> bool {
        self.turn_pending
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn is_folded(&self) -> bool {
        !self.not_folded
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }

    /// Neither folded nor all-in: the only seats that take turns.
    pub fn can_act(&self) -> bool {
        self.not_folded && !self.all_in
    }

    pub(crate) fn set_role(&mut self, role: SeatRole) {
        self.role = role;
    }

    pub(crate) fn give_hole_cards(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    /// Payouts never exceed the table total, which fits in `u32`.
    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.chips += amount;
    }

    /// Move `amount` chips from the stack into this street's bet.
    /// Callers validate first; an oversized amount is a logic error and is capped.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.betted += paid;
        paid
    }

    /// Per-street reset. Fold state survives until the next hand.
    pub(crate) fn reset_street(&mut self) {
        self.betted = 0;
        self.turn_pending = self.can_act();
    }

    pub(crate) fn reset_hand(&mut self) {
        self.betted = 0;
        self.turn_pending = false;
        self.all_in = false;
        self.not_folded = true;
        self.role = SeatRole::Normal;
        self.hole = None;
    }
}
