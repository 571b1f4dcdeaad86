//! Per-table event stream.
//!
//! Every state change a table makes is appended to its [`EventLog`] as a
//! typed [`TableEvent`] with a sequence number and a UTC timestamp.
//! Collaborators poll the log with [`EventLog::since`] and forward what they
//! have not seen yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::PlayerAction;

/// Represents a betting street in Texas Hold'em poker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    /// Hole cards dealt, no board
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
}

impl Street {
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Number of board cards showing once this street is dealt.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    PlayerSeated {
        player: String,
        budget: u32,
    },
    PlayerReady {
        player: String,
    },
    PlayerLeft {
        player: String,
    },
    BlindsUpdated {
        small_blind: u32,
        big_blind: u32,
    },
    HandStarted {
        hand: u64,
        dealer: String,
        small_blind: String,
        big_blind: String,
    },
    BlindPosted {
        player: String,
        amount: u32,
    },
    HoleCardsDealt {
        players: usize,
    },
    ActionTaken {
        player: String,
        street: Street,
        action: PlayerAction,
        amount: u32,
    },
    TurnTimedOut {
        player: String,
        turn_id: u64,
    },
    PotUpdated {
        pot: u32,
    },
    BetReset,
    StreetDealt {
        street: Street,
        cards: Vec<Card>,
    },
    HandEnded {
        pot: u32,
    },
    ShowdownTaken {
        winners: Vec<String>,
    },
    PotAwarded {
        player: String,
        amount: u32,
    },
    HandCancelled {
        refunded: u32,
    },
    PlayerBusted {
        player: String,
    },
}

/// An event stamped with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub seq: u64,
    pub ts: DateTime<Utc>,
    pub event: TableEvent,
}

/// Append-only event log with sequence numbers starting at 1.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LoggedEvent>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues numbering after `last_seq`, used when a table is restored.
    pub fn resume_after(last_seq: u64) -> Self {
        Self {
            entries: Vec::new(),
            next_seq: last_seq,
        }
    }

    pub fn push(&mut self, event: TableEvent) -> u64 {
        self.next_seq += 1;
        self.entries.push(LoggedEvent {
            seq: self.next_seq,
            ts: Utc::now(),
            event,
        });
        self.next_seq
    }

    /// Events with a sequence number greater than `seq`.
    pub fn since(&self, seq: u64) -> &[LoggedEvent] {
        let start = self.entries.partition_point(|e| e.seq <= seq);
        &self.entries[start..]
    }

    pub fn last_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry up to and including `seq`.
    pub fn truncate_through(&mut self, seq: u64) {
        let end = self.entries.partition_point(|e| e.seq <= seq);
        self.entries.drain(..end);
    }
}
