use std::collections::HashSet;

use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;

#[test]
fn fresh_deck_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.deal().expect("should have 52 cards");
        assert!(set.insert(c), "card {c} duplicated at position {i}");
    }
    assert_eq!(deck.deal(), Err(GameError::EmptyDeck));
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    let a: Vec<Card> = (0..10).map(|_| d1.deal().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    let a: Vec<Card> = (0..10).map(|_| d1.deal().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.deal().unwrap()).collect();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn reshuffle_restores_the_full_deck() {
    let mut deck = Deck::new_with_seed(8);
    for _ in 0..20 {
        deck.deal().unwrap();
    }
    deck.shuffle();
    assert_eq!(deck.remaining(), 52);
}

#[test]
fn burn_and_deal_follow_holdem_procedure() {
    let mut deck = Deck::new_with_seed(777);
    let players = 4;

    let mut dealt = Vec::new();
    for _ in 0..2 * players {
        dealt.push(deck.deal().unwrap());
    }
    for reveal in [3, 1, 1] {
        deck.burn().unwrap();
        for _ in 0..reveal {
            dealt.push(deck.deal().unwrap());
        }
    }

    assert_eq!(deck.remaining(), 52 - 2 * players - 3 - 5);
    let unique: HashSet<Card> = dealt.iter().copied().collect();
    assert_eq!(unique.len(), dealt.len());
}
