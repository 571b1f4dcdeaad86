//! # holdem-engine: Texas Hold'em Table Core
//!
//! A synchronous, deterministic engine for one multiplayer Texas Hold'em
//! table: seating, blind rotation, dealing, four betting streets and a
//! showdown that ranks every remaining player and splits the pot.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`hand`] - Hands, the comparison sort order and the ten categories
//! - [`classify`] - Best five cards out of hole cards plus board
//! - [`compare`] - Showdown ranking with shared ranks for ties
//! - [`table`] - Table state machine
//! - [`player`] - Seats and player actions
//! - [`rules`] - Betting validation
//! - [`payout`] - Pot and side-pot awards
//! - [`events`] - Per-table event stream
//! - [`record`] - Flat persistence shape of a table
//! - [`config`] - Game parameters and policies
//! - [`logger`] - HandRecord serialization to JSONL
//! - [`errors`] - Error types for table operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::config::GameParameters;
//! use holdem_engine::player::PlayerAction;
//! use holdem_engine::table::{Phase, Table};
//!
//! let params = GameParameters { min_players: 2, ..GameParameters::default() };
//! let mut table = Table::with_seed(params, 42).unwrap();
//! for name in ["ann", "bob"] {
//!     table.seat(name, 1_000).unwrap();
//!     table.mark_ready(name).unwrap();
//! }
//! table.start().unwrap();
//!
//! while let Some(player) = table.current_player().map(str::to_string) {
//!     table.act(&player, PlayerAction::Fold).unwrap();
//! }
//! assert_eq!(table.phase(), Phase::Ended);
//!
//! let showdown = table.show_down().unwrap();
//! assert_eq!(showdown.winners().len(), 1);
//! ```
//!
//! ## Ranking Hands
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::classify::best_hand;
//! use holdem_engine::compare::{rank_contenders, Contender};
//!
//! let board = "Kd7s2c9hTc";
//! let mut contenders = Vec::new();
//! for (name, hole) in [("ann", "KhKs"), ("bob", "AcAd")] {
//!     let cards = parse_cards(&format!("{hole}{board}")).unwrap();
//!     let best = best_hand(&cards).unwrap();
//!     contenders.push(Contender::new(name, best.category, best.hand));
//! }
//! let ranking = rank_contenders(&contenders).unwrap();
//! assert_eq!(ranking.rank_of("ann"), Some(1));
//! assert_eq!(ranking.rank_of("bob"), Some(2));
//! ```

pub mod cards;
pub mod classify;
pub mod compare;
pub mod config;
pub mod deck;
pub mod errors;
pub mod events;
pub mod hand;
pub mod logger;
pub mod payout;
pub mod player;
pub mod record;
pub mod rules;
pub mod table;
