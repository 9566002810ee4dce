use chipstack_engine::cards::{Card, Rank as R, Suit as S};
use chipstack_engine::hand::{compare_hands, evaluate_hand, Category, HandEvaluator, StandardEvaluator};

fn c(r: R, s: S) -> Card {
    Card::new(r, s)
}

fn score(hole: [Card; 2], board: &[Card]) -> u32 {
    StandardEvaluator.evaluate(hole, board)
}

#[test]
fn board_straight_flush_is_found_with_hole_cards() {
    let board = [
        c(R::Nine, S::Hearts),
        c(R::Ten, S::Hearts),
        c(R::Jack, S::Hearts),
        c(R::Two, S::Clubs),
        c(R::Three, S::Diamonds),
    ];
    let hole = [c(R::Queen, S::Hearts), c(R::King, S::Hearts)];
    let mut cards = hole.to_vec();
    cards.extend_from_slice(&board);
    assert_eq!(evaluate_hand(&cards).category, Category::StraightFlush);
    assert!(score(hole, &board) > score([c(R::Ace, S::Spades), c(R::Ace, S::Clubs)], &board));
}

#[test]
fn wheel_loses_to_six_high_straight() {
    let board = [
        c(R::Two, S::Hearts),
        c(R::Three, S::Clubs),
        c(R::Four, S::Diamonds),
        c(R::Five, S::Spades),
        c(R::King, S::Hearts),
    ];
    let wheel = score([c(R::Ace, S::Clubs), c(R::Nine, S::Clubs)], &board);
    let six_high = score([c(R::Six, S::Clubs), c(R::Nine, S::Diamonds)], &board);
    assert!(six_high > wheel);
}

#[test]
fn category_ladder_orders_scores() {
    let board = [
        c(R::King, S::Hearts),
        c(R::King, S::Clubs),
        c(R::Seven, S::Hearts),
        c(R::Four, S::Hearts),
        c(R::Two, S::Spades),
    ];
    let quads = score([c(R::King, S::Diamonds), c(R::King, S::Spades)], &board);
    let full_house = score([c(R::Seven, S::Clubs), c(R::Seven, S::Spades)], &board);
    let flush = score([c(R::Ace, S::Hearts), c(R::Nine, S::Hearts)], &board);
    let trips = score([c(R::King, S::Diamonds), c(R::Nine, S::Clubs)], &board);
    let two_pair = score([c(R::Four, S::Clubs), c(R::Nine, S::Clubs)], &board);
    let pair = score([c(R::Queen, S::Clubs), c(R::Nine, S::Clubs)], &board);
    let ladder = [quads, full_house, flush, trips, two_pair, pair];
    assert!(ladder.windows(2).all(|w| w[0] > w[1]), "{ladder:?}");
}

#[test]
fn kicker_decides_equal_pairs() {
    let board = [
        c(R::Ace, S::Hearts),
        c(R::Ten, S::Clubs),
        c(R::Seven, S::Diamonds),
        c(R::Four, S::Spades),
        c(R::Two, S::Hearts),
    ];
    let king_kicker = [c(R::Ace, S::Clubs), c(R::King, S::Diamonds)];
    let queen_kicker = [c(R::Ace, S::Diamonds), c(R::Queen, S::Clubs)];
    assert!(score(king_kicker, &board) > score(queen_kicker, &board));
}

#[test]
fn board_plays_for_both_hands() {
    let board = [
        c(R::Ten, S::Hearts),
        c(R::Jack, S::Clubs),
        c(R::Queen, S::Diamonds),
        c(R::King, S::Spades),
        c(R::Ace, S::Hearts),
    ];
    let a = score([c(R::Two, S::Clubs), c(R::Three, S::Diamonds)], &board);
    let b = score([c(R::Four, S::Clubs), c(R::Five, S::Spades)], &board);
    assert_eq!(a, b);
}

#[test]
fn three_pairs_use_best_two_and_best_kicker() {
    let cards = [
        c(R::Nine, S::Hearts),
        c(R::Nine, S::Clubs),
        c(R::Six, S::Hearts),
        c(R::Six, S::Clubs),
        c(R::Four, S::Hearts),
        c(R::Four, S::Clubs),
        c(R::Two, S::Spades),
    ];
    let hs = evaluate_hand(&cards);
    assert_eq!(hs.category, Category::TwoPair);
    assert_eq!(&hs.kickers[..3], &[9, 6, 4]);

    let weaker = [
        c(R::Nine, S::Diamonds),
        c(R::Nine, S::Spades),
        c(R::Six, S::Diamonds),
        c(R::Six, S::Spades),
        c(R::Three, S::Hearts),
    ];
    assert!(compare_hands(&hs, &evaluate_hand(&weaker)).is_gt());
}
