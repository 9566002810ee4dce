//! Human-readable text for cards and table narration.
//!
//! Everything here is pure; the table hands the strings to its
//! [`Notifier`](crate::notify::Notifier).

use crate::cards::{Card, Rank, Suit};

pub fn rank_text(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
}

pub fn suit_glyph(suit: Suit) -> char {
    match suit {
        Suit::Spades => '♠',
        Suit::Hearts => '♥',
        Suit::Diamonds => '♦',
        Suit::Clubs => '♣',
    }
}

/// `A♠`, `10♦`
pub fn card_text(card: Card) -> String {
    format!("{}{}", rank_text(card.rank), suit_glyph(card.suit))
}

/// Cards in parentheses separated by spaces: `(A♠) (10♦)`.
pub fn cards_text(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| format!("({})", card_text(*c)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn board_text(cards: &[Card]) -> String {
    format!("Community Cards: {}", cards_text(cards))
}
