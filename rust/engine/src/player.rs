use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::Hand;

/// Represents a player action during a betting round.
/// Actions can involve betting amounts or no-cost moves like check/fold.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet
    Call,
    /// Open the betting with the specified amount
    Bet(u32),
    /// Raise the current bet by the specified amount
    Raise(u32),
    /// Bet all remaining chips
    AllIn,
}

/// A player seated at a table together with their per-hand state.
///
/// `budget` is the player's chip stack behind; chips put in front of the
/// player this street are tracked in `current_bet`, and everything put in
/// this hand in `committed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub name: String,
    pub budget: u32,
    pub ready: bool,
    pub folded: bool,
    pub all_in: bool,
    pub current_bet: u32,
    pub committed: u32,
    pub acted: bool,
    pub hole: Hand,
}

impl Seat {
    pub fn new(name: impl Into<String>, budget: u32) -> Self {
        Self {
            name: name.into(),
            budget,
            ready: false,
            folded: false,
            all_in: false,
            current_bet: 0,
            committed: 0,
            acted: false,
            hole: Hand::new(),
        }
    }

    /// Still contesting the pot.
    pub fn is_live(&self) -> bool {
        !self.folded
    }

    /// Live and holding chips, so the seat can still act.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    pub fn give_card(&mut self, card: Card) {
        self.hole.add_card(card);
    }

    /// Moves up to `amount` chips from the budget into the current bet and
    /// returns what was actually paid. Paying the last chip marks the seat
    /// all-in.
    pub fn pay(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.budget);
        self.budget -= paid;
        self.current_bet += paid;
        self.committed += paid;
        if self.budget == 0 && paid > 0 {
            self.all_in = true;
        }
        paid
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.budget = self.budget.saturating_add(amount);
    }

    /// Clears the per-hand state before a new hand.
    pub fn reset_for_hand(&mut self) {
        self.folded = false;
        self.all_in = false;
        self.current_bet = 0;
        self.committed = 0;
        self.acted = false;
        self.hole.clear();
    }

    /// Gives back every chip committed this hand.
    pub fn refund(&mut self) -> u32 {
        let refunded = self.committed;
        self.add_chips(refunded);
        self.reset_for_hand();
        refunded
    }
}

/// Public view of a seat, safe to show every player: no hole cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub name: String,
    pub budget: u32,
    pub ready: bool,
    pub folded: bool,
    pub all_in: bool,
    pub current_bet: u32,
}

impl From<&Seat> for SeatView {
    fn from(seat: &Seat) -> Self {
        Self {
            name: seat.name.clone(),
            budget: seat.budget,
            ready: seat.ready,
            folded: seat.folded,
            all_in: seat.all_in,
            current_bet: seat.current_bet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paying_caps_at_budget_and_marks_all_in() {
        let mut seat = Seat::new("ann", 30);
        assert_eq!(seat.pay(10), 10);
        assert!(!seat.all_in);
        assert_eq!(seat.pay(50), 20);
        assert!(seat.all_in);
        assert_eq!(seat.budget, 0);
        assert_eq!(seat.current_bet, 30);
        assert_eq!(seat.committed, 30);
    }

    #[test]
    fn refund_restores_committed_chips() {
        let mut seat = Seat::new("bob", 100);
        seat.pay(40);
        seat.current_bet = 0;
        seat.pay(10);
        assert_eq!(seat.refund(), 50);
        assert_eq!(seat.budget, 100);
        assert_eq!(seat.committed, 0);
        assert!(seat.hole.is_empty());
    }
}
