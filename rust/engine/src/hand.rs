use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Number of cards in a complete poker hand.
pub const HAND_SIZE: usize = 5;

/// The ten hand categories, weakest to strongest.
///
/// The discriminant is the category tag consumed by the comparator
/// (`0` = high card, `9` = royal flush).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
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
    RoyalFlush = 9,
}

impl Category {
    /// All categories from strongest to weakest.
    pub const DESCENDING: [Category; 10] = [
        Category::RoyalFlush,
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::OnePair,
        Category::HighCard,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Category> {
        Category::DESCENDING.into_iter().find(|c| c.tag() == tag)
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
            Category::RoyalFlush => "royal flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered collection of cards: a player's hole cards while a hand is
/// played, then the best five cards at showdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == HAND_SIZE
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Reorders the cards for comparison: non-ace cards ascending by rank,
    /// then every ace in its original relative order.
    ///
    /// After sorting a classified five-card hand, the category comparators
    /// read pairs, trips and kickers at fixed indices.
    pub fn sort_for_comparison(&mut self) {
        let (mut rest, aces): (Vec<Card>, Vec<Card>) =
            self.cards.iter().copied().partition(|c| c.rank != Rank::Ace);
        rest.sort_by_key(|c| c.rank);
        rest.extend(aces);
        self.cards = rest;
    }

    pub fn sorted_for_comparison(&self) -> Hand {
        let mut sorted = self.clone();
        sorted.sort_for_comparison();
        sorted
    }

    /// How many cards in the hand share `rank`.
    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank == rank).count()
    }

    pub(crate) fn rank_at(&self, index: usize) -> Rank {
        self.cards[index].rank
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for card in &self.cards {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn hand(s: &str) -> Hand {
        Hand::from_cards(parse_cards(s).unwrap())
    }

    #[test]
    fn sort_puts_aces_last_in_original_order() {
        let sorted = hand("AsKh2cAd9d").sorted_for_comparison();
        assert_eq!(sorted.to_string(), "2c 9d Kh As Ad");
    }

    #[test]
    fn sort_without_aces_is_ascending() {
        let sorted = hand("Tc3h7d3sJc").sorted_for_comparison();
        let ranks: Vec<Rank> = sorted.cards().iter().map(|c| c.rank).collect();
        assert_eq!(
            ranks,
            vec![Rank::Three, Rank::Three, Rank::Seven, Rank::Ten, Rank::Jack]
        );
    }

    #[test]
    fn category_tags_round_trip() {
        for category in Category::DESCENDING {
            assert_eq!(Category::from_tag(category.tag()), Some(category));
        }
        assert_eq!(Category::from_tag(10), None);
        assert!(Category::RoyalFlush > Category::HighCard);
    }

    #[test]
    fn completeness_tracks_five_cards() {
        let mut h = hand("AsKs");
        assert!(!h.is_complete());
        h.add_cards(parse_cards("QsJsTs").unwrap());
        assert!(h.is_complete());
        assert_eq!(h.count_rank(Rank::Ace), 1);
    }
}
