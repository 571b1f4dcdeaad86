//! Showdown ranking.
//!
//! [`rank_contenders`] turns a snapshot of `(player, category, hand)` tuples
//! into a [`Ranking`]: rank 1 is best and tied players share a rank. Ranks
//! are competition-style: two players tied at rank 1 are followed by rank 3.
//! Pot splitting in [`crate::payout`] relies on this numbering.
//!
//! Every category comparator expects hands sorted with
//! [`Hand::sort_for_comparison`], which lets it read pairs, trips and kickers
//! at fixed positions instead of re-deriving the hand's structure.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::cards::Rank;
use crate::errors::GameError;
use crate::hand::{Category, Hand, HAND_SIZE};

/// One player's entry at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contender {
    pub name: String,
    pub category: Category,
    pub hand: Hand,
}

impl Contender {
    pub fn new(name: impl Into<String>, category: Category, hand: Hand) -> Self {
        Self {
            name: name.into(),
            category,
            hand,
        }
    }
}

/// Final order of a showdown, keyed by player name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    ranks: BTreeMap<String, u32>,
}

impl Ranking {
    pub fn rank_of(&self, name: &str) -> Option<u32> {
        self.ranks.get(name).copied()
    }

    /// Players holding rank 1.
    pub fn winners(&self) -> Vec<&str> {
        self.ranks
            .iter()
            .filter(|(_, &rank)| rank == 1)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Players sorted by rank, then by name.
    pub fn ordered(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .ranks
            .iter()
            .map(|(name, &rank)| (name.as_str(), rank))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Distinct ranks in ascending order.
    pub fn tiers(&self) -> Vec<u32> {
        let mut tiers: Vec<u32> = self.ranks.values().copied().collect();
        tiers.sort_unstable();
        tiers.dedup();
        tiers
    }

    pub fn as_map(&self) -> &BTreeMap<String, u32> {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, rank: u32) {
        self.ranks.insert(name.into(), rank);
    }
}

/// Ranks every contender.
///
/// Categories are processed strongest first; each category group is placed
/// behind every player already ranked, then ordered internally by its
/// category comparator.
///
/// # Errors
///
/// [`GameError::InvalidHand`] when a hand does not hold exactly five cards or
/// a name appears twice.
pub fn rank_contenders(contenders: &[Contender]) -> Result<Ranking, GameError> {
    let mut seen = HashSet::new();
    for contender in contenders {
        if !contender.hand.is_complete() {
            return Err(GameError::InvalidHand(format!(
                "{} holds {} cards",
                contender.name,
                contender.hand.len()
            )));
        }
        if !seen.insert(contender.name.as_str()) {
            return Err(GameError::InvalidHand(format!(
                "{} appears twice",
                contender.name
            )));
        }
    }

    let sorted: Vec<Hand> = contenders
        .iter()
        .map(|c| c.hand.sorted_for_comparison())
        .collect();

    let mut ranking = Ranking::default();
    let mut placed = 0u32;

    for category in Category::DESCENDING {
        let mut group: Vec<usize> = (0..contenders.len())
            .filter(|&i| contenders[i].category == category)
            .collect();
        if group.is_empty() {
            continue;
        }

        // best first; stable so equal hands keep input order
        group.sort_by(|&a, &b| compare_sorted(category, &sorted[b], &sorted[a]));

        let mut previous: Option<(usize, u32)> = None;
        for (position, &index) in group.iter().enumerate() {
            let rank = match previous {
                Some((prev, prev_rank))
                    if compare_sorted(category, &sorted[prev], &sorted[index])
                        == Ordering::Equal =>
                {
                    prev_rank
                }
                _ => placed + position as u32 + 1,
            };
            ranking.insert(contenders[index].name.clone(), rank);
            previous = Some((index, rank));
        }
        placed += group.len() as u32;
    }

    Ok(ranking)
}

/// Compares two five-card hands of the same category.
///
/// The hands are sorted first, so callers may pass them in any order. Hands
/// of any other size only compare by their highest cards.
pub fn compare_hands(category: Category, a: &Hand, b: &Hand) -> Ordering {
    compare_sorted(
        category,
        &a.sorted_for_comparison(),
        &b.sorted_for_comparison(),
    )
}

/// Orders two classified hands: category first, then the category comparator.
pub fn compare_classified(a: (Category, &Hand), b: (Category, &Hand)) -> Ordering {
    match a.0.cmp(&b.0) {
        Ordering::Equal => compare_hands(a.0, a.1, b.1),
        ord => ord,
    }
}

fn compare_sorted(category: Category, a: &Hand, b: &Hand) -> Ordering {
    // the category comparators read fixed positions of a five-card hand
    if a.len() != HAND_SIZE || b.len() != HAND_SIZE {
        return compare_highest_cards(a, b);
    }
    match category {
        Category::HighCard | Category::Flush => compare_highest_cards(a, b),
        Category::OnePair => compare_one_pair(a, b),
        Category::TwoPair => compare_two_pair(a, b),
        Category::ThreeOfAKind => compare_trips(a, b),
        Category::Straight | Category::StraightFlush | Category::RoyalFlush => {
            compare_straight(a, b)
        }
        Category::FullHouse => compare_full_house(a, b),
        Category::FourOfAKind => compare_quads(a, b),
    }
}

/// Rank primitive: the Ace always compares strictly highest.
pub fn compare_ranks(a: Rank, b: Rank) -> Ordering {
    match (a, b) {
        _ if a == b => Ordering::Equal,
        (Rank::Ace, _) => Ordering::Greater,
        (_, Rank::Ace) => Ordering::Less,
        _ => a.value().cmp(&b.value()),
    }
}

/// Walks both sorted hands from the top card down; the first differing rank
/// decides.
pub fn compare_highest_cards(a: &Hand, b: &Hand) -> Ordering {
    (0..a.len().min(b.len()))
        .rev()
        .map(|i| compare_ranks(a.rank_at(i), b.rank_at(i)))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Rank of the card appearing exactly twice, looked up at positions 3 and 1.
fn pair_rank(hand: &Hand) -> Option<Rank> {
    [3, 1]
        .into_iter()
        .map(|i| hand.rank_at(i))
        .find(|&rank| hand.count_rank(rank) == 2)
}

pub(crate) fn compare_one_pair(a: &Hand, b: &Hand) -> Ordering {
    match (pair_rank(a), pair_rank(b)) {
        (Some(pa), Some(pb)) if pa != pb => compare_ranks(pa, pb),
        _ => compare_highest_cards(a, b),
    }
}

/// `(best pair, second pair, kicker)` of a sorted two-pair hand.
fn two_pair_ranks(hand: &Hand) -> (Rank, Rank, Rank) {
    let kicker = [0, 2, 4]
        .into_iter()
        .map(|i| hand.rank_at(i))
        .find(|&rank| hand.count_rank(rank) == 1)
        .unwrap_or_else(|| hand.rank_at(4));
    (hand.rank_at(3), hand.rank_at(1), kicker)
}

pub(crate) fn compare_two_pair(a: &Hand, b: &Hand) -> Ordering {
    let (best_a, second_a, kicker_a) = two_pair_ranks(a);
    let (best_b, second_b, kicker_b) = two_pair_ranks(b);
    compare_ranks(best_a, best_b)
        .then_with(|| compare_ranks(second_a, second_b))
        .then_with(|| compare_ranks(kicker_a, kicker_b))
}

pub(crate) fn compare_trips(a: &Hand, b: &Hand) -> Ordering {
    compare_ranks(a.rank_at(2), b.rank_at(2)).then_with(|| compare_highest_cards(a, b))
}

pub(crate) fn compare_quads(a: &Hand, b: &Hand) -> Ordering {
    compare_ranks(a.rank_at(1), b.rank_at(1)).then_with(|| compare_highest_cards(a, b))
}

pub(crate) fn compare_full_house(a: &Hand, b: &Hand) -> Ordering {
    compare_ranks(a.rank_at(2), b.rank_at(2)).then_with(|| match (pair_rank(a), pair_rank(b)) {
        (Some(pa), Some(pb)) => compare_ranks(pa, pb),
        _ => Ordering::Equal,
    })
}

/// Top card of a sorted straight. A-2-3-4-5 tops out at the Five.
pub(crate) fn straight_high(hand: &Hand) -> Rank {
    let top = hand.rank_at(hand.len() - 1);
    if top == Rank::Ace && hand.rank_at(0) == Rank::Two {
        Rank::Five
    } else {
        top
    }
}

pub(crate) fn compare_straight(a: &Hand, b: &Hand) -> Ordering {
    compare_ranks(straight_high(a), straight_high(b))
}
