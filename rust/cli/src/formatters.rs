//! Board, action and ranking formatters for terminal output.
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_cli::formatters::format_board;
//!
//! let flop = parse_cards("AsKhQd").unwrap();
//! assert_eq!(format_board(&flop), "[As Kh Qd]");
//! ```

use holdem_engine::cards::Card;
use holdem_engine::compare::Ranking;
use holdem_engine::player::PlayerAction;

/// Board in bracket notation, `[]` before the flop.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(Card::to_string).collect();
    format!("[{}]", formatted.join(" "))
}

pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Bet(amount) => format!("bet {}", amount),
        PlayerAction::Raise(amount) => format!("raise {}", amount),
        PlayerAction::AllIn => "all-in".to_string(),
    }
}

/// `1. ann, 1. bob, 3. cat` in rank order.
pub fn format_ranking(ranking: &Ranking) -> String {
    ranking
        .ordered()
        .iter()
        .map(|(name, rank)| format!("{}. {}", rank, name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;
    use holdem_engine::classify::best_hand;
    use holdem_engine::compare::{Contender, rank_contenders};

    #[test]
    fn empty_board_is_brackets() {
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn actions_read_naturally() {
        assert_eq!(format_action(&PlayerAction::Fold), "fold");
        assert_eq!(format_action(&PlayerAction::Bet(100)), "bet 100");
        assert_eq!(format_action(&PlayerAction::Raise(50)), "raise 50");
        assert_eq!(format_action(&PlayerAction::AllIn), "all-in");
    }

    #[test]
    fn ties_share_a_rank_in_the_listing() {
        let contenders: Vec<Contender> = [("ann", "AhKhQhJhTh"), ("bob", "AsKsQsJsTs"), ("cat", "2c2d5h8s9c")]
            .into_iter()
            .map(|(name, cards)| {
                let best = best_hand(&parse_cards(cards).unwrap()).unwrap();
                Contender::new(name, best.category, best.hand)
            })
            .collect();
        let ranking = rank_contenders(&contenders).unwrap();
        assert_eq!(format_ranking(&ranking), "1. ann, 1. bob, 3. cat");
    }
}
