use std::cmp::Ordering;

use crate::cards::{Card, Suit};

/// Numeric hand strength. Higher wins; equal scores split the pot.
pub type Score = u32;

/// External hand-strength oracle used at showdown.
pub trait HandEvaluator: Send + Sync {
    fn evaluate(&self, hole: [Card; 2], board: &[Card]) -> Score;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    /// Packs category and kickers into one comparable integer.
    pub fn score(&self) -> Score {
        let mut s = self.category as u32;
        for &k in &self.kickers {
            s = (s << 4) | u32::from(k);
        }
        s
    }
}

/// Best five-card hand found among `hole` + `board` (any 5 to 7 cards).
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn evaluate(&self, hole: [Card; 2], board: &[Card]) -> Score {
        let mut cards = Vec::with_capacity(2 + board.len());
        cards.extend_from_slice(&hole);
        cards.extend_from_slice(board);
        evaluate_hand(&cards).score()
    }
}

pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        by_suit[suit_index(c.suit)].push(r);
    }

    let flush_suit = by_suit.iter().position(|ranks| ranks.len() >= 5);

    if let Some(s) = flush_suit {
        let mut suited = by_suit[s].clone();
        suited.sort_unstable();
        suited.dedup();
        if let Some(high) = straight_high(&suited) {
            return strength(Category::StraightFlush, &[high]);
        }
    }

    let (quads, trips, pairs, singles) = group_by_count(&rank_counts);

    if let Some(&quad) = quads.first() {
        let kicker = (2..=14u8)
            .rev()
            .find(|&r| r != quad && rank_counts[r as usize] > 0)
            .unwrap_or(0);
        return strength(Category::FourOfAKind, &[quad, kicker]);
    }

    if let Some(&trip) = trips.first() {
        // a second set of trips plays as the pair
        let pair = trips.get(1).or_else(|| pairs.first()).copied();
        if let Some(pair) = pair {
            return strength(Category::FullHouse, &[trip, pair]);
        }
    }

    if let Some(s) = flush_suit {
        let mut ranks = by_suit[s].clone();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        return strength(Category::Flush, &ranks[..5]);
    }

    let present: Vec<u8> = (2..=14u8).filter(|&r| rank_counts[r as usize] > 0).collect();
    if let Some(high) = straight_high(&present) {
        return strength(Category::Straight, &[high]);
    }

    if let Some(&trip) = trips.first() {
        let rest = kickers_excluding(&rank_counts, &[trip], 2);
        return strength(Category::ThreeOfAKind, &[&[trip][..], rest.as_slice()].concat());
    }

    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        let rest = kickers_excluding(&rank_counts, &[high, low], 1);
        return strength(Category::TwoPair, &[&[high, low][..], rest.as_slice()].concat());
    }

    if let Some(&pair) = pairs.first() {
        let rest = kickers_excluding(&rank_counts, &[pair], 3);
        return strength(Category::OnePair, &[&[pair][..], rest.as_slice()].concat());
    }

    strength(Category::HighCard, &singles[..singles.len().min(5)])
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn strength(category: Category, ranks: &[u8]) -> HandStrength {
    let mut kickers = [0u8; 5];
    for (slot, &r) in kickers.iter_mut().zip(ranks) {
        *slot = r;
    }
    HandStrength { category, kickers }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Spades => 0,
        Suit::Hearts => 1,
        Suit::Diamonds => 2,
        Suit::Clubs => 3,
    }
}

/// Highest card of the best straight in ascending, de-duplicated `ranks`.
/// The wheel (A-2-3-4-5) reports 5.
fn straight_high(ranks: &[u8]) -> Option<u8> {
    let mut mask: u16 = 0;
    for &r in ranks {
        mask |= 1 << r;
    }
    if mask & (1 << 14) != 0 {
        mask |= 1 << 1;
    }
    (5..=14u8).rev().find(|&high| {
        let window = 0b11111u16 << (high - 4);
        mask & window == window
    })
}

/// Ranks grouped by multiplicity, each list ordered high -> low.
fn group_by_count(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut quads = vec![];
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            4 => quads.push(r),
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (quads, trips, pairs, singles)
}

fn kickers_excluding(rank_counts: &[u8; 15], used: &[u8], n: usize) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|r| rank_counts[*r as usize] > 0 && !used.contains(r))
        .take(n)
        .collect()
}
