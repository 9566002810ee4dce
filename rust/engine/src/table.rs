use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::format::{board_text, cards_text};
use crate::hand::{HandEvaluator, Score, StandardEvaluator};
use crate::history::{HandRecord, Payout};
use crate::notify::{Notifier, SilentNotifier};
use crate::player::{ParticipantId, Player, SeatRole};

/// Hold'em allows at most 23 seats before a 52-card deck runs dry.
pub const MAX_SEATS: usize = 23;

/// Position of a table within one hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Stage {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    NextRound,
}

/// Why a street's betting is over.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BettingCompletion {
    /// Everyone has acted and matched the minimum, folded or gone all-in
    Normal,
    /// A single un-folded player remains
    FoldOut,
    /// At most one player can still bet and they have matched the minimum
    AllInLock,
}

/// Parameters fixed for the lifetime of a table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Chips each participant starts with
    pub starting_chips: u32,
    /// Small blind; the big blind is always twice this
    pub small_blind: u32,
    /// Seed for the deck, the initial dealer and odd-chip draws
    #[serde(default)]
    pub seed: Option<u64>,
    /// Seat of the first dealer; drawn at random when absent
    #[serde(default)]
    pub first_dealer: Option<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_chips: 1000,
            small_blind: 10,
            seed: None,
            first_dealer: None,
        }
    }
}

/// One live poker game: seats, pot, board and the betting state machine.
///
/// Stage operations are called in order by an orchestration loop:
/// [`preflop`](Table::preflop), then [`flop`](Table::flop),
/// [`turn`](Table::turn), [`river`](Table::river), each followed by a
/// betting round that ends once [`betting_complete`](Table::betting_complete)
/// reports a reason, then [`showdown`](Table::showdown) and
/// [`next_round`](Table::next_round).
pub struct Table {
    players: Vec<Player>,
    pub(crate) pot: u32,
    pub(crate) min_bet: u32,
    small_blind: u32,
    community_cards: Vec<Card>,
    dealer_index: usize,
    small_blind_index: usize,
    big_blind_index: usize,
    /// Seats owed a turn this street, in turn order
    pub(crate) pending_players: Vec<usize>,
    pub(crate) pending_index: usize,
    stage: Stage,
    hand_number: u32,
    winner: Option<ParticipantId>,
    deck: Deck,
    rng: ChaCha20Rng,
    evaluator: Arc<dyn HandEvaluator>,
    pub(crate) notifier: Arc<dyn Notifier>,
    last_record: Option<HandRecord>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("players", &self.players)
            .field("pot", &self.pot)
            .field("min_bet", &self.min_bet)
            .field("community_cards", &self.community_cards)
            .field("dealer_index", &self.dealer_index)
            .field("pending_players", &self.pending_players)
            .field("pending_index", &self.pending_index)
            .field("stage", &self.stage)
            .field("hand_number", &self.hand_number)
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Seat every participant with the configured starting stack.
    pub fn new(participants: Vec<ParticipantId>, config: &TableConfig) -> Result<Self, GameError> {
        let seats = participants
            .into_iter()
            .map(|p| (p, config.starting_chips))
            .collect();
        Self::from_stacks(seats, config)
    }

    /// Seat participants with individual stacks; `config.starting_chips` is ignored.
    pub fn from_stacks(
        seats: Vec<(ParticipantId, u32)>,
        config: &TableConfig,
    ) -> Result<Self, GameError> {
        if seats.len() < 2 {
            return Err(GameError::NotEnoughPlayers(seats.len()));
        }
        if seats.len() > MAX_SEATS {
            return Err(GameError::InvalidConfig(format!(
                "at most {MAX_SEATS} seats are supported, got {}",
                seats.len()
            )));
        }
        for (i, (id, _)) in seats.iter().enumerate() {
            if seats[..i].iter().any(|(other, _)| other == id) {
                return Err(GameError::DuplicateParticipant(id.to_string()));
            }
        }
        if seats.iter().any(|(_, chips)| *chips == 0) {
            return Err(GameError::InvalidConfig(
                "every seat needs a positive stack".into(),
            ));
        }
        if config.small_blind == 0 {
            return Err(GameError::InvalidConfig(
                "small blind must be positive".into(),
            ));
        }
        if config.small_blind.checked_mul(2).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "small blind {} is too large for a big blind",
                config.small_blind
            )));
        }
        // Every chip total (pot, bets, stacks) is bounded by the table total.
        if seats
            .iter()
            .try_fold(0u32, |total, (_, chips)| total.checked_add(*chips))
            .is_none()
        {
            return Err(GameError::InvalidConfig(
                "total chips at the table exceed the supported maximum".into(),
            ));
        }
        if let Some(d) = config.first_dealer {
            if d >= seats.len() {
                return Err(GameError::InvalidConfig(format!(
                    "first dealer seat {d} is out of range"
                )));
            }
        }

        let mut rng = ChaCha20Rng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let deck = Deck::new_with_seed(rng.random());
        let n = seats.len();
        let dealer_index = config
            .first_dealer
            .unwrap_or_else(|| rng.random_range(0..n));

        Ok(Self {
            players: seats
                .into_iter()
                .map(|(id, chips)| Player::new(id, chips))
                .collect(),
            pot: 0,
            min_bet: 0,
            small_blind: config.small_blind,
            community_cards: Vec::with_capacity(5),
            dealer_index,
            small_blind_index: 0,
            big_blind_index: 0,
            pending_players: Vec::new(),
            pending_index: 0,
            stage: Stage::NextRound,
            hand_number: 0,
            winner: None,
            deck,
            rng,
            evaluator: Arc::new(StandardEvaluator),
            notifier: Arc::new(SilentNotifier),
            last_record: None,
        })
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn HandEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn min_bet(&self) -> u32 {
        self.min_bet
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn big_blind(&self) -> u32 {
        self.small_blind * 2
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }
    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }
    pub fn small_blind_index(&self) -> usize {
        self.small_blind_index
    }
    pub fn big_blind_index(&self) -> usize {
        self.big_blind_index
    }
    pub fn pending_players(&self) -> &[usize] {
        &self.pending_players
    }
    pub fn pending_index(&self) -> usize {
        self.pending_index
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }
    pub fn winner(&self) -> Option<&ParticipantId> {
        self.winner.as_ref()
    }
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
    pub fn last_record(&self) -> Option<&HandRecord> {
        self.last_record.as_ref()
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub(crate) fn player_mut(&mut self, seat: usize) -> &mut Player {
        &mut self.players[seat]
    }

    pub fn chips_of(&self, participant: &ParticipantId) -> Option<u32> {
        self.seat_of(participant).map(|s| self.players[s].chips())
    }

    pub fn seat_of(&self, participant: &ParticipantId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == participant)
    }

    /// Whose turn it is, if anyone is owed one.
    pub fn current_player(&self) -> Option<&Player> {
        self.pending_players
            .get(self.pending_index)
            .map(|&seat| &self.players[seat])
    }

    /// Chips on the table: every stack plus the pot.
    pub fn total_chips(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.chips())).sum::<u64>() + u64::from(self.pot)
    }

    fn unfolded_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_folded()).count()
    }

    /// Reset the hand, shuffle, deal hole cards, assign seats, post blinds
    /// and open preflop betting with the seat after the big blind.
    pub fn preflop(&mut self) -> Result<(), GameError> {
        let n = self.players.len();
        if n < 2 {
            return Err(GameError::NotEnoughPlayers(n));
        }
        if self.hand_number > 0 {
            self.dealer_index = (self.dealer_index + 1) % n;
        }
        self.hand_number += 1;
        self.stage = Stage::Preflop;
        self.community_cards.clear();
        self.pot = 0;
        for p in &mut self.players {
            p.reset_hand();
        }
        tracing::debug!(hand = self.hand_number, dealer = self.dealer_index, "preflop");

        self.deck.reset();
        for seat in 0..n {
            let cards = self.deck.deal(2)?;
            let hole = [cards[0], cards[1]];
            self.players[seat].give_hole_cards(hole);
            let id = self.players[seat].id().clone();
            self.notifier
                .send_private(&id, format!("Your cards: {}", cards_text(&hole)));
        }

        self.assign_seats();
        self.post_blinds();
        self.min_bet = self.big_blind();

        for p in &mut self.players {
            p.turn_pending = p.can_act();
        }
        let start = (self.big_blind_index + 1) % n;
        self.open_turns(start);
        Ok(())
    }

    fn assign_seats(&mut self) {
        let n = self.players.len();
        let d = self.dealer_index;
        if n == 2 {
            self.small_blind_index = d;
            self.big_blind_index = (d + 1) % n;
            self.players[d].set_role(SeatRole::SmallDealer);
        } else {
            self.small_blind_index = (d + 1) % n;
            self.big_blind_index = (d + 2) % n;
            self.players[d].set_role(SeatRole::Dealer);
            self.players[self.small_blind_index].set_role(SeatRole::SmallBlind);
        }
        self.players[self.big_blind_index].set_role(SeatRole::BigBlind);

        let sb = self.players[self.small_blind_index].id().clone();
        let bb = self.players[self.big_blind_index].id().clone();
        self.notifier
            .send_public(format!("{} is the dealer.", self.players[d].id()));
        self.notifier
            .send_public(format!("{sb} You're the small blind."));
        self.notifier.send_public(format!("{bb} You're the big blind."));
    }

    fn post_blinds(&mut self) {
        let small = self.small_blind;
        let big = self.big_blind();
        for (seat, amount, label) in [
            (self.small_blind_index, small, "small"),
            (self.big_blind_index, big, "big"),
        ] {
            let p = &mut self.players[seat];
            let paid = p.commit(amount);
            if p.chips() == 0 {
                p.all_in = true;
            }
            self.pot += paid;
            let text = format!("{} posts {label} blind of {paid}.", p.id());
            self.notifier.send_public(text);
        }
    }

    /// Deal the three-card flop and open betting at the small blind.
    pub fn flop(&mut self) -> Result<bool, GameError> {
        self.deal_street(Stage::Flop, 3)
    }

    pub fn turn(&mut self) -> Result<bool, GameError> {
        self.deal_street(Stage::Turn, 1)
    }

    pub fn river(&mut self) -> Result<bool, GameError> {
        self.deal_street(Stage::River, 1)
    }

    /// Returns `false` without touching anything when the hand is already
    /// decided by folds.
    fn deal_street(&mut self, stage: Stage, count: usize) -> Result<bool, GameError> {
        if self.unfolded_count() <= 1 {
            tracing::debug!(?stage, "street skipped, hand already decided");
            return Ok(false);
        }
        let cards = self.deck.deal(count)?;
        self.stage = stage;
        self.community_cards.extend(cards);
        self.min_bet = 0;
        for p in &mut self.players {
            p.reset_street();
        }
        self.notifier.send_public(board_text(&self.community_cards));
        tracing::debug!(?stage, board = self.community_cards.len(), "street dealt");

        self.open_turns(self.small_blind_index);
        Ok(true)
    }

    /// Turn order is every seat, circularly from `start`; the first player
    /// able to act moves first.
    fn open_turns(&mut self, start: usize) {
        let n = self.players.len();
        self.pending_players = (0..n).map(|i| (start + i) % n).collect();
        self.pending_index = 0;
        if !self.players[self.pending_players[0]].can_act() {
            self.advance_turn();
        }
    }

    /// Move `pending_index` to the next seat that can act. Folded and
    /// all-in seats are skipped; if nobody can act the index stays put.
    pub(crate) fn advance_turn(&mut self) {
        let len = self.pending_players.len();
        for step in 1..=len {
            let i = (self.pending_index + step) % len;
            if self.players[self.pending_players[i]].can_act() {
                self.pending_index = i;
                return;
            }
        }
    }

    /// Decide whether the current street's betting is over.
    pub fn betting_complete(&self) -> Option<BettingCompletion> {
        let seats: Vec<&Player> = self
            .pending_players
            .iter()
            .map(|&s| &self.players[s])
            .collect();
        let unfolded: Vec<&Player> = seats.iter().copied().filter(|p| !p.is_folded()).collect();
        if unfolded.len() <= 1 {
            return Some(BettingCompletion::FoldOut);
        }

        let settled = seats.iter().all(|p| {
            !p.turn_pending() && (p.betted() >= self.min_bet || p.is_all_in() || p.is_folded())
        });
        if settled {
            return Some(BettingCompletion::Normal);
        }

        let mut live = unfolded.iter().filter(|p| !p.is_all_in());
        match (live.next(), live.next()) {
            (None, _) => Some(BettingCompletion::AllInLock),
            (Some(only), None) if only.betted() >= self.min_bet => {
                Some(BettingCompletion::AllInLock)
            }
            _ => None,
        }
    }

    /// Award the pot. A lone survivor takes it unseen; otherwise every
    /// un-folded hand is scored and the best score wins, ties splitting the
    /// pot with the odd chips going to one tied winner drawn at random.
    pub fn showdown(&mut self) -> HandRecord {
        self.stage = Stage::Showdown;
        self.pending_players.clear();
        self.pending_index = 0;

        let contenders: Vec<usize> = (0..self.players.len())
            .filter(|&s| !self.players[s].is_folded())
            .collect();
        let pot = self.pot;

        let (winners, uncontested) = if contenders.len() <= 1 {
            (contenders, true)
        } else {
            let scored: Vec<(usize, Score)> = contenders
                .iter()
                .filter_map(|&s| {
                    let hole = self.players[s].hole_cards()?;
                    let text = format!("{} shows {}", self.players[s].id(), cards_text(&hole));
                    self.notifier.send_public(text);
                    Some((s, self.evaluator.evaluate(hole, &self.community_cards)))
                })
                .collect();
            let best = scored.iter().map(|&(_, score)| score).max();
            let winners = scored
                .iter()
                .filter(|&&(_, score)| Some(score) == best)
                .map(|&(s, _)| s)
                .collect();
            (winners, false)
        };

        let payouts = self.divide_pot(&winners);
        for payout in &payouts {
            let text = if uncontested {
                format!("{} wins {} chips.", payout.participant, payout.amount)
            } else if winners.len() > 1 {
                format!("{} splits the pot and takes {} chips.", payout.participant, payout.amount)
            } else {
                format!("{} wins {} chips with the best hand.", payout.participant, payout.amount)
            };
            self.notifier.send_public(text);
        }

        let record = HandRecord {
            hand_number: self.hand_number,
            board: self.community_cards.clone(),
            pot,
            winners: winners
                .iter()
                .map(|&s| self.players[s].id().clone())
                .collect(),
            payouts,
            uncontested,
            ts: None,
        }
        .stamped();
        tracing::debug!(hand = self.hand_number, pot, winners = record.winners.len(), "showdown");
        self.last_record = Some(record.clone());
        record
    }

    /// `pot / n` each; the `pot % n` remainder goes to one winner at random.
    fn divide_pot(&mut self, winners: &[usize]) -> Vec<Payout> {
        if winners.is_empty() {
            return Vec::new();
        }
        let n = winners.len() as u32;
        let share = self.pot / n;
        let remainder = self.pot % n;
        let lucky = if remainder > 0 {
            self.rng.random_range(0..winners.len())
        } else {
            0
        };

        let mut payouts = Vec::with_capacity(winners.len());
        for (i, &seat) in winners.iter().enumerate() {
            let amount = if i == lucky { share + remainder } else { share };
            self.players[seat].add_chips(amount);
            payouts.push(Payout {
                participant: self.players[seat].id().clone(),
                amount,
            });
        }
        self.pot = 0;
        payouts
    }

    /// Clear the board and pot, drop busted seats, reset per-hand flags and
    /// declare a winner once a single stack remains. Returns who busted.
    pub fn next_round(&mut self) -> Vec<ParticipantId> {
        self.stage = Stage::NextRound;
        self.community_cards.clear();
        self.pot = 0;
        self.min_bet = 0;
        self.pending_players.clear();
        self.pending_index = 0;

        let keep: Vec<bool> = self.players.iter().map(|p| p.chips() > 0).collect();
        let kept = keep.iter().filter(|&&k| k).count();
        if kept > 0 {
            let before = keep[..self.dealer_index].iter().filter(|&&k| k).count();
            // a busted dealer hands the button on as if they were still seated
            self.dealer_index = if keep[self.dealer_index] {
                before
            } else {
                (before + kept - 1) % kept
            };
        }

        let mut eliminated = Vec::new();
        let mut seat = 0;
        self.players.retain(|p| {
            let stays = keep[seat];
            seat += 1;
            if !stays {
                eliminated.push(p.id().clone());
            }
            stays
        });
        for id in &eliminated {
            self.notifier
                .send_public(format!("{id} is out of chips and leaves the table."));
            tracing::info!(participant = %id, "player eliminated");
        }
        for p in &mut self.players {
            p.reset_hand();
        }

        if self.players.len() == 1 {
            let winner = self.players[0].id().clone();
            tracing::info!(winner = %winner, hands = self.hand_number, "game decided");
            self.winner = Some(winner);
        }
        eliminated
    }
}
