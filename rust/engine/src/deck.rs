use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// A 52-card deck dealt from the top.
///
/// Built once per hand and shuffled at construction; a card dealt or burned
/// is gone for the rest of the hand.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    seed: u64,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Shuffled deck from a random seed.
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    /// Shuffled deck whose order is fully determined by `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            cards: full_deck(),
            position: 0,
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.shuffle();
        deck
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restores all 52 cards and permutes them uniformly.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal(&mut self) -> Result<Card, GameError> {
        let card = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::EmptyDeck)?;
        self.position += 1;
        Ok(card)
    }

    /// Discards the top card face down.
    pub fn burn(&mut self) -> Result<(), GameError> {
        self.deal().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_deck_reports_empty() {
        let mut deck = Deck::new_with_seed(9);
        for _ in 0..52 {
            deck.deal().expect("card available");
        }
        assert_eq!(deck.remaining(), 0);
        assert_eq!(deck.deal(), Err(GameError::EmptyDeck));
        assert_eq!(deck.burn(), Err(GameError::EmptyDeck));
    }

    #[test]
    fn burn_consumes_one_card() {
        let mut deck = Deck::new_with_seed(3);
        deck.burn().unwrap();
        assert_eq!(deck.remaining(), 51);
    }
}
