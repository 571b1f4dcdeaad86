use std::cmp::Ordering;

use holdem_engine::cards::{full_deck, parse_cards, Card};
use holdem_engine::classify::best_hand;
use holdem_engine::compare::{compare_classified, rank_contenders, Contender};
use holdem_engine::hand::{Category, Hand};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn contender(name: &str, category: Category, cards: &str) -> Contender {
    Contender::new(name, category, Hand::from_cards(parse_cards(cards).unwrap()))
}

#[test]
fn higher_pair_ranks_first() {
    let ranking = rank_contenders(&[
        contender("eights", Category::OnePair, "8c8dAsKhQc"),
        contender("tens", Category::OnePair, "TcTd2s3h4c"),
    ])
    .unwrap();
    assert_eq!(ranking.rank_of("tens"), Some(1));
    assert_eq!(ranking.rank_of("eights"), Some(2));
}

#[test]
fn two_pair_orders_by_best_pair_then_kicker() {
    let ranking = rank_contenders(&[
        contender("p1", Category::TwoPair, "KcKd5s5h2c"),
        contender("p2", Category::TwoPair, "KhKs5c5d9c"),
        contender("p3", Category::TwoPair, "QcQdJsJhAc"),
    ])
    .unwrap();
    assert_eq!(ranking.rank_of("p2"), Some(1));
    assert_eq!(ranking.rank_of("p1"), Some(2));
    assert_eq!(ranking.rank_of("p3"), Some(3));
}

#[test]
fn hands_differing_only_by_suit_tie() {
    let ranking = rank_contenders(&[
        contender("a", Category::HighCard, "AhKd9c7s2d"),
        contender("b", Category::HighCard, "AsKc9d7h2c"),
        contender("c", Category::HighCard, "AdQc9h7c2s"),
    ])
    .unwrap();
    assert_eq!(ranking.rank_of("a"), Some(1));
    assert_eq!(ranking.rank_of("b"), Some(1));
    assert_eq!(ranking.rank_of("c"), Some(3));
    assert_eq!(ranking.winners(), vec!["a", "b"]);
}

#[test]
fn categories_outrank_kickers() {
    let ranking = rank_contenders(&[
        contender("pair", Category::OnePair, "2c2dAsKhQc"),
        contender("high", Category::HighCard, "AhKdQsJc9h"),
        contender("flush", Category::Flush, "2h5h7h9hJh"),
        contender("straight", Category::Straight, "Ah2c3d4s5h"),
    ])
    .unwrap();
    assert_eq!(ranking.rank_of("flush"), Some(1));
    assert_eq!(ranking.rank_of("straight"), Some(2));
    assert_eq!(ranking.rank_of("pair"), Some(3));
    assert_eq!(ranking.rank_of("high"), Some(4));
}

#[test]
fn wheel_loses_to_six_high_straight() {
    let ranking = rank_contenders(&[
        contender("wheel", Category::Straight, "Ah2c3d4s5h"),
        contender("six", Category::Straight, "2d3c4h5s6d"),
    ])
    .unwrap();
    assert_eq!(ranking.rank_of("six"), Some(1));
    assert_eq!(ranking.rank_of("wheel"), Some(2));
}

#[test]
fn ranking_agrees_with_pairwise_comparison() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for round in 0..25 {
        let mut deck: Vec<Card> = full_deck();
        deck.shuffle(&mut rng);
        let contenders: Vec<Contender> = deck
            .chunks(7)
            .take(7)
            .enumerate()
            .map(|(i, cards)| {
                let best = best_hand(cards).expect("seven cards");
                Contender::new(format!("p{i}"), best.category, best.hand)
            })
            .collect();

        let ranking = rank_contenders(&contenders).expect("valid snapshot");
        for a in &contenders {
            for b in &contenders {
                let ra = ranking.rank_of(&a.name).unwrap();
                let rb = ranking.rank_of(&b.name).unwrap();
                let ord = compare_classified((a.category, &a.hand), (b.category, &b.hand));
                // better hand, smaller rank
                assert_eq!(rb.cmp(&ra), ord, "round {round}: {} vs {}", a.name, b.name);
            }
        }

        let better_than = |name: &str| {
            let r = ranking.rank_of(name).unwrap();
            contenders
                .iter()
                .filter(|c| ranking.rank_of(&c.name).unwrap() < r)
                .count() as u32
        };
        for c in &contenders {
            assert_eq!(ranking.rank_of(&c.name), Some(1 + better_than(&c.name)));
        }
    }
}

#[test]
fn best_hand_prefers_board_flush_over_pair() {
    let best = best_hand(&parse_cards("AsAd2h5h8hJhKh").unwrap()).unwrap();
    assert_eq!(best.category, Category::Flush);
    let other = best_hand(&parse_cards("QsQd2h5h8hJhKh").unwrap()).unwrap();
    assert_eq!(
        compare_classified((best.category, &best.hand), (other.category, &other.hand)),
        Ordering::Equal
    );
}
