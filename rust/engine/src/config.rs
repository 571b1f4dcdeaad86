use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// What happens when a player's turn timer runs out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// The player folds.
    #[default]
    Fold,
    /// The player checks; facing a bet this still folds.
    Check,
}

/// What happens to a running hand when a seated player leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectPolicy {
    /// The leaving player folds; the seat is released at settlement.
    #[default]
    Fold,
    /// The hand is cancelled and every committed chip refunded.
    CancelHand,
}

/// Resolved table configuration.
///
/// Loaded by an external collaborator (the CLI reads TOML and environment
/// variables) and handed to the table already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameParameters {
    pub name: String,
    pub min_players: usize,
    pub max_players: usize,
    pub buy_in: u32,
    /// Starting chips handed to a player seated through the directory.
    pub tokens: u32,
    pub small_blind: u32,
    /// `big blind = small blind * blind_multiplier`.
    pub blind_multiplier: u32,
    /// Factor applied to both blinds at the start of every hand but the
    /// first.
    pub blind_increase: u32,
    /// Prize pool percentages by finishing position.
    pub pot_split: Vec<u32>,
    pub turn_seconds: u64,
    pub timeout_policy: TimeoutPolicy,
    pub disconnect_policy: DisconnectPolicy,
}

impl Default for GameParameters {
    fn default() -> Self {
        Self::sit_and_go()
    }
}

impl GameParameters {
    /// The standard five-seat sit-and-go.
    pub fn sit_and_go() -> Self {
        Self {
            name: "Texas Holdem Sit&Go".to_string(),
            min_players: 3,
            max_players: 5,
            buy_in: 10,
            tokens: 1_000,
            small_blind: 10,
            blind_multiplier: 2,
            blind_increase: 2,
            pot_split: vec![50, 35, 15],
            turn_seconds: 30,
            timeout_policy: TimeoutPolicy::Fold,
            disconnect_policy: DisconnectPolicy::Fold,
        }
    }

    pub fn big_blind(&self) -> u32 {
        self.small_blind.saturating_mul(self.blind_multiplier)
    }

    /// Checks internal consistency.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidParameters`] naming the first offending field.
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: &str| Err(GameError::InvalidParameters(msg.to_string()));
        if self.min_players < 2 {
            return invalid("min_players must be at least 2");
        }
        if self.max_players < self.min_players {
            return invalid("max_players must not be below min_players");
        }
        if self.max_players > 22 {
            // 22 * 2 hole cards + 3 burns + 5 board = 52
            return invalid("max_players must be at most 22");
        }
        if self.small_blind == 0 {
            return invalid("small_blind must be positive");
        }
        if self.blind_multiplier == 0 {
            return invalid("blind_multiplier must be positive");
        }
        if self.blind_increase == 0 {
            return invalid("blind_increase must be positive");
        }
        if self.tokens == 0 {
            return invalid("tokens must be positive");
        }
        if self.turn_seconds == 0 {
            return invalid("turn_seconds must be positive");
        }
        Ok(())
    }

    /// The pot split as configured when it sums to 100, otherwise an equal
    /// split over the same number of places.
    pub fn normalized_pot_split(&self) -> Vec<u32> {
        let total: u32 = self.pot_split.iter().sum();
        if total == 100 || self.pot_split.is_empty() {
            return self.pot_split.clone();
        }
        let equal = 100 / self.pot_split.len() as u32;
        vec![equal; self.pot_split.len()]
    }

    /// Prize for each finishing position out of `prize_pool`.
    pub fn prize_shares(&self, prize_pool: u32) -> Vec<u32> {
        self.normalized_pot_split()
            .into_iter()
            .map(|pct| (u64::from(prize_pool) * u64::from(pct) / 100) as u32)
            .collect()
    }
}
