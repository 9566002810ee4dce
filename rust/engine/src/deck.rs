use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Deck of 52 unique cards. Draw order after a shuffle is authoritative:
/// `deal` always takes from the top.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.shuffle();
        deck
    }

    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    /// Uniform permutation of the cards still in the deck.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Restore all 52 cards, then shuffle.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.shuffle();
    }

    /// Remove and return the top `n` cards.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.cards.len() {
            return Err(GameError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let at = self.cards.len() - n;
        let mut drawn = self.cards.split_off(at);
        drawn.reverse();
        Ok(drawn)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Cards handed out since the last reset.
    pub fn dealt(&self) -> usize {
        52 - self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
