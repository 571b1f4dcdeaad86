use std::cmp::Ordering;

use crate::cards::{Card, Rank};
use crate::compare::compare_classified;
use crate::errors::GameError;
use crate::hand::{Category, Hand, HAND_SIZE};

/// Best five cards chosen from a player's hole cards and the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub category: Category,
    pub hand: Hand,
}

/// Picks the strongest five-card hand out of 5 to 7 cards.
///
/// Every five-card combination is classified and the strongest one kept,
/// using the same comparator the showdown ranks with, so a player's chosen
/// hand is always the one that would rank highest.
///
/// # Errors
///
/// [`GameError::InvalidHand`] when fewer than five or more than seven cards
/// are supplied, or when a card appears twice.
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::classify::best_hand;
/// use holdem_engine::hand::Category;
///
/// let cards = parse_cards("AhKhQhJhTh2c3d").unwrap();
/// let best = best_hand(&cards).unwrap();
/// assert_eq!(best.category, Category::RoyalFlush);
/// ```
pub fn best_hand(cards: &[Card]) -> Result<Classified, GameError> {
    if !(HAND_SIZE..=7).contains(&cards.len()) {
        return Err(GameError::InvalidHand(format!(
            "expected 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    for (i, card) in cards.iter().enumerate() {
        if cards[i + 1..].contains(card) {
            return Err(GameError::InvalidHand(format!("{card} appears twice")));
        }
    }

    let mut best: Option<Classified> = None;
    for combo in combinations(cards.len()) {
        let hand = Hand::from_cards(combo.iter().map(|&i| cards[i]));
        let category = classify_five(&hand);
        let better = match &best {
            None => true,
            Some(current) => {
                compare_classified((category, &hand), (current.category, &current.hand))
                    == Ordering::Greater
            }
        };
        if better {
            best = Some(Classified { category, hand });
        }
    }

    best.ok_or_else(|| GameError::InvalidHand("no five-card combination".to_string()))
}

/// Category of exactly five cards.
pub fn classify_five(hand: &Hand) -> Category {
    let cards = hand.cards();
    let mut rank_counts = [0u8; 15];
    let mut rank_mask: u16 = 0;
    for card in cards {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= 1 << card.rank.value();
    }

    let flush = cards.windows(2).all(|w| w[0].suit == w[1].suit);
    let straight = straight_high_from_mask(rank_mask);

    match (flush, straight) {
        (true, Some(Rank::Ace)) => return Category::RoyalFlush,
        (true, Some(_)) => return Category::StraightFlush,
        _ => {}
    }

    let mut groups: Vec<u8> = rank_counts.iter().copied().filter(|&c| c > 0).collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    match groups.as_slice() {
        [4, ..] => Category::FourOfAKind,
        [3, 2] => Category::FullHouse,
        _ if flush => Category::Flush,
        _ if straight.is_some() => Category::Straight,
        [3, ..] => Category::ThreeOfAKind,
        [2, 2, ..] => Category::TwoPair,
        [2, ..] => Category::OnePair,
        _ => Category::HighCard,
    }
}

fn straight_high_from_mask(mask: u16) -> Option<Rank> {
    let mut m = mask;
    if m & (1 << 14) != 0 {
        m |= 1 << 1;
    }
    (5..=14u8).rev().find_map(|high| {
        let window = 0b11111u16 << (high - 4);
        if m & window == window {
            Rank::from_u8(high)
        } else {
            None
        }
    })
}

/// All ascending 5-index combinations out of `n`.
fn combinations(n: usize) -> Vec<[usize; HAND_SIZE]> {
    let mut out = Vec::new();
    let mut idx = [0, 1, 2, 3, 4];
    if n < HAND_SIZE {
        return out;
    }
    loop {
        out.push(idx);
        // rightmost index that can still move
        let Some(pos) = (0..HAND_SIZE).rev().find(|&i| idx[i] < n - HAND_SIZE + i) else {
            return out;
        };
        idx[pos] += 1;
        for j in pos + 1..HAND_SIZE {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn classify(s: &str) -> Category {
        classify_five(&Hand::from_cards(parse_cards(s).unwrap()))
    }

    #[test]
    fn classifies_each_category() {
        assert_eq!(classify("AhKhQhJhTh"), Category::RoyalFlush);
        assert_eq!(classify("9h8h7h6h5h"), Category::StraightFlush);
        assert_eq!(classify("5d4d3d2dAd"), Category::StraightFlush);
        assert_eq!(classify("9c9d9s9hAc"), Category::FourOfAKind);
        assert_eq!(classify("9c9d9sAhAc"), Category::FullHouse);
        assert_eq!(classify("2h7h9hJhKh"), Category::Flush);
        assert_eq!(classify("Ah2c3d4s5h"), Category::Straight);
        assert_eq!(classify("TcJdQhKsAc"), Category::Straight);
        assert_eq!(classify("7c7d7s2h9c"), Category::ThreeOfAKind);
        assert_eq!(classify("7c7d2s2h9c"), Category::TwoPair);
        assert_eq!(classify("7c7d3s2h9c"), Category::OnePair);
        assert_eq!(classify("7c8d3s2h9c"), Category::HighCard);
    }

    #[test]
    fn wrap_around_is_not_a_straight() {
        assert_eq!(classify("QcKdAs2h3c"), Category::HighCard);
    }

    #[test]
    fn combinations_of_seven_choose_five() {
        let combos = combinations(7);
        assert_eq!(combos.len(), 21);
        assert_eq!(combos[0], [0, 1, 2, 3, 4]);
        assert_eq!(combos[20], [2, 3, 4, 5, 6]);
        assert_eq!(combinations(5).len(), 1);
    }

    #[test]
    fn picks_best_five_of_seven() {
        let best = best_hand(&parse_cards("2c2d5h5s9c9dKh").unwrap()).unwrap();
        assert_eq!(best.category, Category::TwoPair);
        assert_eq!(best.hand.count_rank(Rank::Nine), 2);
        assert_eq!(best.hand.count_rank(Rank::Five), 2);
        assert_eq!(best.hand.count_rank(Rank::King), 1);

        let best = best_hand(&parse_cards("Ah2c3d4s5h6c9d").unwrap()).unwrap();
        assert_eq!(best.category, Category::Straight);
        assert_eq!(best.hand.count_rank(Rank::Six), 1);
        assert_eq!(best.hand.count_rank(Rank::Ace), 0);
    }

    #[test]
    fn rejects_bad_card_counts_and_duplicates() {
        assert!(best_hand(&parse_cards("AhKh").unwrap()).is_err());
        assert!(best_hand(&parse_cards("AhKhQhJhTh9h8h7h").unwrap()).is_err());
        assert!(best_hand(&parse_cards("AhAhQhJhTh").unwrap()).is_err());
    }
}
