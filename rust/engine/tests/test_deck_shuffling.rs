use std::collections::HashSet;

use chipstack_engine::cards::Card;
use chipstack_engine::deck::Deck;
use chipstack_engine::errors::GameError;

#[test]
fn fresh_deck_deals_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    let cards = deck.deal(52).expect("should have 52 cards");
    let set: HashSet<Card> = cards.iter().copied().collect();
    assert_eq!(set.len(), 52);
    assert_eq!(deck.remaining(), 0);
    assert!(matches!(
        deck.deal(1),
        Err(GameError::InsufficientCards { requested: 1, remaining: 0 })
    ));
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    assert_eq!(d1.deal(10).unwrap(), d2.deal(10).unwrap());
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    assert_ne!(
        d1.deal(10).unwrap(),
        d2.deal(10).unwrap(),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn remaining_plus_dealt_is_always_52() {
    let mut deck = Deck::new_with_seed(5);
    for n in [2, 2, 2, 3, 1, 1] {
        deck.deal(n).unwrap();
        assert_eq!(deck.remaining() + deck.dealt(), 52);
    }
    deck.reset();
    assert_eq!(deck.remaining(), 52);
    assert_eq!(deck.dealt(), 0);
}

#[test]
fn reset_restores_every_card_in_a_new_order() {
    let mut deck = Deck::new_with_seed(77);
    let first = deck.deal(52).unwrap();
    deck.reset();
    let second = deck.deal(52).unwrap();
    let a: HashSet<Card> = first.iter().copied().collect();
    let b: HashSet<Card> = second.iter().copied().collect();
    assert_eq!(a, b);
    assert_ne!(first, second);
}
