//! Single-table state machine.
//!
//! A [`Table`] walks one game through
//! `Seating -> Ready -> Betting(street) -> Ended -> Settled` and back into a
//! new hand. It is synchronous and lock-free; concurrent access is the
//! caller's business (see the service crate's table handle).
//!
//! A call that returns an error leaves the table exactly as it was.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::classify::best_hand;
use crate::compare::{rank_contenders, Contender, Ranking};
use crate::config::{DisconnectPolicy, GameParameters, TimeoutPolicy};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{EventLog, Street, TableEvent};
use crate::hand::Category;
use crate::payout::{award_pot, Award, Contribution};
use crate::player::{PlayerAction, Seat, SeatView};
use crate::rules::{validate_action, ValidatedAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "street", rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for players to sit down and mark ready.
    Seating,
    /// Enough ready players to start.
    Ready,
    Betting(Street),
    /// The river resolved or only one player is left; waiting for showdown.
    Ended,
    /// Showdown taken and chips awarded.
    Settled,
}

impl Phase {
    pub fn in_hand(self) -> bool {
        matches!(self, Phase::Betting(_) | Phase::Ended)
    }
}

/// Who holds the button and the blinds for a freshly started hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartInfo {
    pub hand: u64,
    pub dealer: String,
    pub small_blind: String,
    pub big_blind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub player: String,
    pub action: ValidatedAction,
    /// Chips the action moved into the player's bet.
    pub amount: u32,
    pub phase: Phase,
    /// Seat to act next while betting continues.
    pub next_player: Option<String>,
    pub turn_id: u64,
}

/// A player's cards as revealed at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShownHand {
    pub category: Category,
    pub best_five: Vec<Card>,
    pub hole: Vec<Card>,
}

impl ShownHand {
    /// Hole cards by stable card id.
    pub fn hole_ids(&self) -> Vec<u8> {
        self.hole.iter().map(Card::id).collect()
    }
}

/// Result of settling a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showdown {
    pub hand: u64,
    pub seed: u64,
    pub board: Vec<Card>,
    pub ranking: Ranking,
    /// Revealed hands; empty when everybody but the winner folded.
    pub hands: BTreeMap<String, ShownHand>,
    pub awards: Vec<Award>,
    /// Players unseated because they ran out of chips.
    pub busted: Vec<String>,
    /// Players unseated because they left during the hand.
    pub departed: Vec<String>,
}

impl Showdown {
    pub fn winners(&self) -> Vec<&str> {
        self.ranking.winners()
    }
}

#[derive(Debug)]
pub struct Table {
    pub(crate) params: GameParameters,
    pub(crate) seats: Vec<Seat>,
    pub(crate) dealer: usize,
    pub(crate) small_blind_pos: usize,
    pub(crate) big_blind_pos: usize,
    pub(crate) current: usize,
    pub(crate) small_blind: u32,
    pub(crate) big_blind: u32,
    pub(crate) pot: u32,
    pub(crate) bets: u32,
    pub(crate) bet: u32,
    pub(crate) min_raise: u32,
    pub(crate) phase: Phase,
    pub(crate) street: Street,
    pub(crate) hand_number: u64,
    pub(crate) turn_id: u64,
    pub(crate) flipped: Vec<Card>,
    pub(crate) deck: Deck,
    pub(crate) seed: Option<u64>,
    pub(crate) leaving: Vec<String>,
    pub(crate) events: EventLog,
}

impl Table {
    /// Empty table shuffling from random seeds.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidParameters`] when `params` fail validation.
    pub fn new(params: GameParameters) -> Result<Self, GameError> {
        Self::build(params, None)
    }

    /// Empty table whose decks are derived from `seed` and the hand number,
    /// so the same actions replay the same cards.
    pub fn with_seed(params: GameParameters, seed: u64) -> Result<Self, GameError> {
        Self::build(params, Some(seed))
    }

    fn build(params: GameParameters, seed: Option<u64>) -> Result<Self, GameError> {
        params.validate()?;
        Ok(Self {
            small_blind: params.small_blind,
            big_blind: params.big_blind(),
            min_raise: params.big_blind(),
            params,
            seats: Vec::new(),
            dealer: 0,
            small_blind_pos: 0,
            big_blind_pos: 0,
            current: 0,
            pot: 0,
            bets: 0,
            bet: 0,
            phase: Phase::Seating,
            street: Street::Preflop,
            hand_number: 0,
            turn_id: 0,
            flipped: Vec::new(),
            deck: Deck::new_with_seed(seed.unwrap_or_default()),
            seed,
            leaving: Vec::new(),
            events: EventLog::new(),
        })
    }

    // ---- seating -------------------------------------------------------

    /// Sits a new player down with `budget` chips.
    ///
    /// # Errors
    ///
    /// - [`GameError::HandInProgress`] while a hand is running
    /// - [`GameError::AlreadyInGame`] when the name is taken
    /// - [`GameError::TableFull`] when every seat is occupied
    /// - [`GameError::InvalidBetAmount`] for an empty budget
    pub fn seat(&mut self, name: &str, budget: u32) -> Result<(), GameError> {
        if self.phase.in_hand() {
            return Err(GameError::HandInProgress);
        }
        if self.seats.iter().any(|s| s.name == name) {
            return Err(GameError::AlreadyInGame(name.to_string()));
        }
        if self.seats.len() >= self.params.max_players {
            return Err(GameError::TableFull {
                capacity: self.params.max_players,
            });
        }
        if budget == 0 {
            return Err(GameError::InvalidBetAmount {
                amount: 0,
                minimum: 1,
            });
        }
        self.seats.push(Seat::new(name, budget));
        self.events.push(TableEvent::PlayerSeated {
            player: name.to_string(),
            budget,
        });
        self.refresh_readiness();
        Ok(())
    }

    pub fn mark_ready(&mut self, name: &str) -> Result<(), GameError> {
        let idx = self.seat_index(name)?;
        if self.phase.in_hand() {
            return Err(GameError::CannotMarkReady(name.to_string()));
        }
        self.seats[idx].ready = true;
        self.events.push(TableEvent::PlayerReady {
            player: name.to_string(),
        });
        self.refresh_readiness();
        Ok(())
    }

    /// Removes a player.
    ///
    /// Outside a hand the seat is simply released. During a hand the
    /// configured [`DisconnectPolicy`] applies: either the player folds and
    /// the seat is released at settlement, or the whole hand is cancelled.
    pub fn leave(&mut self, name: &str) -> Result<(), GameError> {
        let idx = self.seat_index(name)?;
        if !self.phase.in_hand() {
            self.unseat(idx);
            self.refresh_readiness();
            return Ok(());
        }

        match self.params.disconnect_policy {
            DisconnectPolicy::CancelHand => {
                self.cancel_hand()?;
                let idx = self.seat_index(name)?;
                self.unseat(idx);
                self.refresh_readiness();
            }
            DisconnectPolicy::Fold => {
                if !self.leaving.iter().any(|n| n == name) {
                    self.leaving.push(name.to_string());
                }
                match self.phase {
                    Phase::Betting(_) if idx == self.current => {
                        self.act(name, PlayerAction::Fold)?;
                    }
                    Phase::Betting(_) => {
                        // out of turn: the action stays where it is
                        self.seats[idx].folded = true;
                        if self.live_count() <= 1 {
                            self.finish_hand();
                            self.turn_id += 1;
                        } else if self.betting_complete() {
                            self.advance_street()?;
                            self.turn_id += 1;
                        }
                    }
                    // the last live player keeps the pot even when leaving
                    _ if self.live_count() > 1 => self.seats[idx].folded = true,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn is_ready_to_start(&self) -> bool {
        self.seats.len() >= self.params.min_players && self.seats.iter().all(|s| s.ready)
    }

    fn refresh_readiness(&mut self) {
        if matches!(self.phase, Phase::Seating | Phase::Ready) {
            self.phase = if self.is_ready_to_start() {
                Phase::Ready
            } else {
                Phase::Seating
            };
        }
    }

    // ---- hand lifecycle ------------------------------------------------

    /// Starts a new hand.
    ///
    /// Rotates dealer and blinds one seat, raises the blinds (from the second
    /// hand on), shuffles a fresh deck, posts the blinds, deals two hole
    /// cards to every seat and hands the action to the seat after the big
    /// blind.
    ///
    /// # Errors
    ///
    /// - [`GameError::AlreadyStarted`] while a hand is running
    /// - [`GameError::NotReady`] without enough ready players
    pub fn start(&mut self) -> Result<StartInfo, GameError> {
        if self.phase.in_hand() {
            return Err(GameError::AlreadyStarted);
        }
        if !self.is_ready_to_start() {
            return Err(GameError::NotReady);
        }

        let n = self.seats.len();
        if self.hand_number == 0 {
            // one rotation away from dealer 0, small blind 1, big blind 2
            self.dealer = n - 1;
            self.small_blind_pos = 0;
            self.big_blind_pos = 1 % n;
        } else {
            self.update_blind();
        }
        self.hand_number += 1;

        for seat in &mut self.seats {
            seat.reset_for_hand();
        }
        self.flipped.clear();
        self.leaving.clear();
        self.deck = match self.seed {
            Some(seed) => Deck::new_with_seed(seed.wrapping_add(self.hand_number)),
            None => Deck::new(),
        };
        self.pot = 0;
        self.bets = 0;
        self.bet = 0;
        self.min_raise = self.big_blind;

        self.set_dealer();
        self.set_small_blind();
        self.set_big_blind();

        let info = StartInfo {
            hand: self.hand_number,
            dealer: self.seats[self.dealer].name.clone(),
            small_blind: self.seats[self.small_blind_pos].name.clone(),
            big_blind: self.seats[self.big_blind_pos].name.clone(),
        };
        self.events.push(TableEvent::HandStarted {
            hand: info.hand,
            dealer: info.dealer.clone(),
            small_blind: info.small_blind.clone(),
            big_blind: info.big_blind.clone(),
        });

        self.post_blind(self.small_blind_pos, self.small_blind);
        self.post_blind(self.big_blind_pos, self.big_blind);
        self.deal_cards()?;

        self.street = Street::Preflop;
        self.phase = Phase::Betting(Street::Preflop);
        self.current = self.big_blind_pos;
        self.turn_id += 1;
        if self.betting_complete() {
            self.advance_street()?;
        } else {
            self.next_player();
        }
        Ok(info)
    }

    /// Applies the acting player's move.
    ///
    /// # Errors
    ///
    /// - [`GameError::NoHandInProgress`] outside a betting round
    /// - [`GameError::UnknownPlayer`] for a name not seated here
    /// - [`GameError::NotPlayersTurn`] when someone else is to act
    /// - [`GameError::CannotCheck`] / [`GameError::InvalidBetAmount`] for an
    ///   illegal move
    pub fn act(&mut self, name: &str, action: PlayerAction) -> Result<ActionOutcome, GameError> {
        let Phase::Betting(street) = self.phase else {
            return Err(GameError::NoHandInProgress);
        };
        let idx = self.seat_index(name)?;
        if idx != self.current {
            return Err(GameError::NotPlayersTurn {
                expected: self.seats[self.current].name.clone(),
                actual: name.to_string(),
            });
        }
        let seat = &self.seats[idx];
        let to_call = self.bet.saturating_sub(seat.current_bet);
        let validated = validate_action(seat.budget, to_call, self.min_raise, action)?;

        let amount = self.apply(idx, &validated);
        self.events.push(TableEvent::ActionTaken {
            player: name.to_string(),
            street,
            action: validated.as_action(),
            amount,
        });
        self.progress()?;
        self.turn_id += 1;

        Ok(ActionOutcome {
            player: name.to_string(),
            action: validated,
            amount,
            phase: self.phase,
            next_player: self.current_player().map(str::to_string),
            turn_id: self.turn_id,
        })
    }

    /// Applies the timeout policy to the player whose turn `turn_id` was.
    ///
    /// # Errors
    ///
    /// [`GameError::StaleTurn`] when action has moved on since `turn_id` was
    /// issued: the player acted first.
    pub fn expire_turn(&mut self, turn_id: u64) -> Result<ActionOutcome, GameError> {
        if turn_id != self.turn_id {
            return Err(GameError::StaleTurn(turn_id));
        }
        if !matches!(self.phase, Phase::Betting(_)) {
            return Err(GameError::NoHandInProgress);
        }
        let seat = &self.seats[self.current];
        let name = seat.name.clone();
        let facing_bet = self.bet > seat.current_bet;
        let action = match self.params.timeout_policy {
            TimeoutPolicy::Check if !facing_bet => PlayerAction::Check,
            TimeoutPolicy::Check | TimeoutPolicy::Fold => PlayerAction::Fold,
        };
        self.events.push(TableEvent::TurnTimedOut {
            player: name.clone(),
            turn_id,
        });
        self.act(&name, action)
    }

    /// Ranks the remaining players, awards the pot and releases busted seats.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameNotStarted`] before the first hand
    /// - [`GameError::GameNotFinished`] while betting is still going on
    pub fn show_down(&mut self) -> Result<Showdown, GameError> {
        if self.hand_number == 0 {
            return Err(GameError::GameNotStarted);
        }
        if self.phase != Phase::Ended {
            return Err(GameError::GameNotFinished);
        }

        let live: Vec<&Seat> = self.seats.iter().filter(|s| s.is_live()).collect();
        let mut hands = BTreeMap::new();
        let ranking = if live.len() == 1 {
            let mut ranking = Ranking::default();
            ranking.insert(live[0].name.clone(), 1);
            ranking
        } else {
            let mut contenders = Vec::with_capacity(live.len());
            for seat in &live {
                let mut cards = seat.hole.cards().to_vec();
                cards.extend_from_slice(&self.flipped);
                let best = best_hand(&cards)?;
                hands.insert(
                    seat.name.clone(),
                    ShownHand {
                        category: best.category,
                        best_five: best.hand.cards().to_vec(),
                        hole: seat.hole.cards().to_vec(),
                    },
                );
                contenders.push(Contender::new(seat.name.clone(), best.category, best.hand));
            }
            rank_contenders(&contenders)?
        };

        let n = self.seats.len();
        let contributions: Vec<Contribution> = (1..=n)
            .map(|k| &self.seats[(self.dealer + k) % n])
            .map(|s| Contribution {
                name: s.name.clone(),
                committed: s.committed,
                live: s.is_live(),
            })
            .collect();
        let awards = award_pot(&contributions, &ranking);

        self.events.push(TableEvent::ShowdownTaken {
            winners: ranking.winners().into_iter().map(str::to_string).collect(),
        });
        for award in &awards {
            if let Some(seat) = self.seats.iter_mut().find(|s| s.name == award.player) {
                seat.add_chips(award.amount);
            }
            self.events.push(TableEvent::PotAwarded {
                player: award.player.clone(),
                amount: award.amount,
            });
        }
        self.pot = 0;
        for seat in &mut self.seats {
            seat.committed = 0;
            seat.current_bet = 0;
        }

        let departed = std::mem::take(&mut self.leaving);
        for name in &departed {
            if let Ok(idx) = self.seat_index(name) {
                self.unseat(idx);
            }
        }
        let busted: Vec<String> = self
            .seats
            .iter()
            .filter(|s| s.budget == 0)
            .map(|s| s.name.clone())
            .collect();
        for name in &busted {
            if let Ok(idx) = self.seat_index(name) {
                self.events.push(TableEvent::PlayerBusted {
                    player: name.clone(),
                });
                self.remove_seat(idx);
            }
        }

        self.phase = Phase::Settled;
        Ok(Showdown {
            hand: self.hand_number,
            seed: self.deck.seed(),
            board: self.flipped.clone(),
            ranking,
            hands,
            awards,
            busted,
            departed,
        })
    }

    /// Abandons the running hand and gives every committed chip back.
    ///
    /// Returns the number of chips refunded.
    pub fn cancel_hand(&mut self) -> Result<u32, GameError> {
        if !self.phase.in_hand() {
            return Err(GameError::NoHandInProgress);
        }
        let refunded: u32 = self.seats.iter_mut().map(Seat::refund).sum();
        self.pot = 0;
        self.bets = 0;
        self.bet = 0;
        self.flipped.clear();
        self.turn_id += 1;
        self.phase = Phase::Seating;
        self.events.push(TableEvent::HandCancelled { refunded });

        for name in std::mem::take(&mut self.leaving) {
            if let Ok(idx) = self.seat_index(&name) {
                self.unseat(idx);
            }
        }
        self.refresh_readiness();
        Ok(refunded)
    }

    // ---- pot and bets --------------------------------------------------

    /// Raises the street's highest bet by `quantity`.
    pub fn update_bet(&mut self, quantity: u32) {
        self.bet = self.bet.saturating_add(quantity);
    }

    /// Adds `quantity` to the chips bet this street.
    pub fn update_bets(&mut self, quantity: u32) {
        self.bets = self.bets.saturating_add(quantity);
    }

    /// Moves the street's bets into the pot.
    pub fn update_pot(&mut self) {
        self.pot = self.pot.saturating_add(self.bets);
        self.bets = 0;
        self.events.push(TableEvent::PotUpdated { pot: self.pot });
    }

    /// Clears the street's highest bet and every seat's current bet.
    pub fn reset_bet(&mut self) {
        self.bet = 0;
        for seat in &mut self.seats {
            seat.current_bet = 0;
        }
        self.events.push(TableEvent::BetReset);
    }

    /// Multiplies both blinds by the configured increase factor.
    pub fn update_blind(&mut self) {
        let factor = self.params.blind_increase;
        self.small_blind = self.small_blind.saturating_mul(factor);
        self.big_blind = self.big_blind.saturating_mul(factor);
        self.events.push(TableEvent::BlindsUpdated {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
        });
    }

    fn post_blind(&mut self, idx: usize, amount: u32) {
        let seat = &mut self.seats[idx];
        let paid = seat.pay(amount);
        let current_bet = seat.current_bet;
        let player = seat.name.clone();
        self.update_bets(paid);
        if current_bet > self.bet {
            self.update_bet(current_bet - self.bet);
        }
        self.events.push(TableEvent::BlindPosted {
            player,
            amount: paid,
        });
    }

    fn apply(&mut self, idx: usize, action: &ValidatedAction) -> u32 {
        let seat = &mut self.seats[idx];
        seat.acted = true;
        if *action == ValidatedAction::Fold {
            seat.folded = true;
            return 0;
        }
        let paid = seat.pay(action.chips());
        let current_bet = seat.current_bet;
        self.update_bets(paid);
        if current_bet > self.bet {
            let raise = current_bet - self.bet;
            self.min_raise = self.min_raise.max(raise);
            self.update_bet(raise);
            // a raise re-opens the action
            for (i, other) in self.seats.iter_mut().enumerate() {
                if i != idx && other.can_act() {
                    other.acted = false;
                }
            }
        }
        paid
    }

    // ---- rotation ------------------------------------------------------

    pub fn set_dealer(&mut self) {
        self.dealer = self.rotate(self.dealer);
    }

    pub fn set_small_blind(&mut self) {
        self.small_blind_pos = self.rotate(self.small_blind_pos);
    }

    pub fn set_big_blind(&mut self) {
        self.big_blind_pos = self.rotate(self.big_blind_pos);
    }

    fn rotate(&self, idx: usize) -> usize {
        match self.seats.len() {
            0 => 0,
            n => (idx + 1) % n,
        }
    }

    /// Moves the action to the next seat that can still act.
    pub fn next_player(&mut self) -> Option<&str> {
        let n = self.seats.len();
        let idx = (1..=n)
            .map(|step| (self.current + step) % n)
            .find(|&i| self.seats[i].can_act())?;
        self.current = idx;
        Some(self.seats[idx].name.as_str())
    }

    // ---- dealing -------------------------------------------------------

    /// Two passes of one hole card per seat, in seat order.
    pub fn deal_cards(&mut self) -> Result<(), GameError> {
        for _ in 0..2 {
            for idx in 0..self.seats.len() {
                let card = self.deck.deal()?;
                self.seats[idx].give_card(card);
            }
        }
        self.events.push(TableEvent::HoleCardsDealt {
            players: self.seats.len(),
        });
        Ok(())
    }

    /// Turns the next card of the deck face up on the board.
    pub fn flip_card(&mut self) -> Result<Card, GameError> {
        let card = self.deck.deal()?;
        self.flipped.push(card);
        Ok(card)
    }

    pub fn flop(&mut self) -> Result<Vec<Card>, GameError> {
        self.deck.burn()?;
        let cards = vec![self.flip_card()?, self.flip_card()?, self.flip_card()?];
        self.close_street(Street::Flop, cards.clone());
        Ok(cards)
    }

    pub fn turn(&mut self) -> Result<Card, GameError> {
        self.deck.burn()?;
        let card = self.flip_card()?;
        self.close_street(Street::Turn, vec![card]);
        Ok(card)
    }

    pub fn river(&mut self) -> Result<Card, GameError> {
        self.deck.burn()?;
        let card = self.flip_card()?;
        self.close_street(Street::River, vec![card]);
        Ok(card)
    }

    fn close_street(&mut self, street: Street, cards: Vec<Card>) {
        self.update_pot();
        self.reset_bet();
        self.street = street;
        self.events.push(TableEvent::StreetDealt { street, cards });
    }

    // ---- progression ---------------------------------------------------

    fn live_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_live()).count()
    }

    fn actor_count(&self) -> usize {
        self.seats.iter().filter(|s| s.can_act()).count()
    }

    /// Every live seat is all-in, or has acted and matched the bet.
    pub fn betting_complete(&self) -> bool {
        self.seats
            .iter()
            .filter(|s| s.is_live())
            .all(|s| s.all_in || (s.acted && s.current_bet == self.bet))
    }

    fn progress(&mut self) -> Result<(), GameError> {
        if self.live_count() <= 1 {
            self.finish_hand();
        } else if self.betting_complete() {
            self.advance_street()?;
        } else {
            self.next_player();
        }
        Ok(())
    }

    /// Deals the next street, and keeps dealing while fewer than two
    /// players can still act.
    fn advance_street(&mut self) -> Result<(), GameError> {
        loop {
            match self.street {
                Street::Preflop => {
                    self.flop()?;
                }
                Street::Flop => {
                    self.turn()?;
                }
                Street::Turn => {
                    self.river()?;
                }
                Street::River => {
                    self.finish_hand();
                    return Ok(());
                }
            }
            self.min_raise = self.big_blind;
            for seat in &mut self.seats {
                seat.acted = false;
            }
            self.phase = Phase::Betting(self.street);
            if self.actor_count() >= 2 {
                self.current = self.dealer;
                self.next_player();
                return Ok(());
            }
        }
    }

    fn finish_hand(&mut self) {
        self.update_pot();
        self.reset_bet();
        self.phase = Phase::Ended;
        self.events.push(TableEvent::HandEnded { pot: self.pot });
    }

    // ---- seats ---------------------------------------------------------

    fn seat_index(&self, name: &str) -> Result<usize, GameError> {
        self.seats
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))
    }

    fn unseat(&mut self, idx: usize) {
        let player = self.seats[idx].name.clone();
        self.remove_seat(idx);
        self.events.push(TableEvent::PlayerLeft { player });
    }

    /// Removes a seat keeping the rotation on track: the next hand's dealer
    /// is the seat after the previous dealer.
    fn remove_seat(&mut self, idx: usize) {
        self.seats.remove(idx);
        let n = self.seats.len();
        if n == 0 {
            self.dealer = 0;
            self.small_blind_pos = 0;
            self.big_blind_pos = 0;
            self.current = 0;
            return;
        }
        if idx <= self.dealer {
            self.dealer = (self.dealer + n - 1) % n;
        }
        self.small_blind_pos = (self.dealer + 1) % n;
        self.big_blind_pos = (self.dealer + 2) % n;
        if idx < self.current {
            self.current -= 1;
        }
        self.current %= n;
    }

    // ---- views ---------------------------------------------------------

    pub fn params(&self) -> &GameParameters {
        &self.params
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Public view of every seat.
    pub fn players(&self) -> Vec<SeatView> {
        self.seats.iter().map(SeatView::from).collect()
    }

    pub fn flipped_cards(&self) -> Vec<Card> {
        self.flipped.clone()
    }

    pub fn hole_cards(&self, name: &str) -> Result<Vec<Card>, GameError> {
        let idx = self.seat_index(name)?;
        Ok(self.seats[idx].hole.cards().to_vec())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn bets(&self) -> u32 {
        self.bets
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }

    /// `(small, big)` blind amounts.
    pub fn blinds(&self) -> (u32, u32) {
        (self.small_blind, self.big_blind)
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn turn_id(&self) -> u64 {
        self.turn_id
    }

    /// Player to act, while a betting round is running.
    pub fn current_player(&self) -> Option<&str> {
        match self.phase {
            Phase::Betting(_) => self.seats.get(self.current).map(|s| s.name.as_str()),
            _ => None,
        }
    }

    /// Chips the player to act needs to call.
    pub fn to_call(&self) -> u32 {
        self.seats
            .get(self.current)
            .map_or(0, |s| self.bet.saturating_sub(s.current_bet))
    }

    pub fn dealer(&self) -> Option<&str> {
        self.seats.get(self.dealer).map(|s| s.name.as_str())
    }

    pub fn small_blind_player(&self) -> Option<&str> {
        self.seats.get(self.small_blind_pos).map(|s| s.name.as_str())
    }

    pub fn big_blind_player(&self) -> Option<&str> {
        self.seats.get(self.big_blind_pos).map(|s| s.name.as_str())
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Forgets events a collaborator has already forwarded.
    pub fn truncate_events_through(&mut self, seq: u64) {
        self.events.truncate_through(seq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(min: usize, max: usize) -> GameParameters {
        GameParameters {
            min_players: min,
            max_players: max,
            ..GameParameters::default()
        }
    }

    fn ready_table(names: &[&str]) -> Table {
        let mut table = Table::with_seed(params(2, 5), 7).unwrap();
        for name in names {
            table.seat(name, 1_000).unwrap();
            table.mark_ready(name).unwrap();
        }
        table
    }

    #[test]
    fn becomes_ready_when_everyone_is_ready() {
        let mut table = Table::new(params(2, 5)).unwrap();
        table.seat("a", 100).unwrap();
        table.seat("b", 100).unwrap();
        table.mark_ready("a").unwrap();
        assert_eq!(table.phase(), Phase::Seating);
        table.mark_ready("b").unwrap();
        assert_eq!(table.phase(), Phase::Ready);
        table.seat("c", 100).unwrap();
        assert_eq!(table.phase(), Phase::Seating);
    }

    #[test]
    fn first_hand_rotates_to_dealer_zero() {
        let mut table = ready_table(&["a", "b", "c"]);
        let info = table.start().unwrap();
        assert_eq!(info.dealer, "a");
        assert_eq!(info.small_blind, "b");
        assert_eq!(info.big_blind, "c");
        assert_eq!(table.current_player(), Some("a"));
        assert_eq!(table.bets(), 30);
        assert_eq!(table.bet(), 20);
    }

    #[test]
    fn removing_the_dealer_passes_the_button_on() {
        let mut table = ready_table(&["a", "b", "c", "d"]);
        table.dealer = 1;
        table.remove_seat(1);
        table.set_dealer();
        assert_eq!(table.dealer(), Some("c"));
    }

    #[test]
    fn raise_reopens_action() {
        let mut table = ready_table(&["a", "b", "c"]);
        table.start().unwrap();
        table.act("a", PlayerAction::Call).unwrap();
        table.act("b", PlayerAction::Call).unwrap();
        table.act("c", PlayerAction::Raise(40)).unwrap();
        assert_eq!(table.current_player(), Some("a"));
        assert!(!table.betting_complete());
    }
}
