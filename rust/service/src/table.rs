//! Shared, timer-driven handle around one engine [`Table`].

use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use std::time::Duration;

use holdem_engine::cards::Card;
use holdem_engine::config::GameParameters;
use holdem_engine::errors::GameError;
use holdem_engine::events::{LoggedEvent, TableEvent};
use holdem_engine::player::{PlayerAction, SeatView};
use holdem_engine::record::TableRecord;
use holdem_engine::table::{ActionOutcome, Phase, Showdown, StartInfo, Table};
use serde::{Deserialize, Serialize};

use crate::errors::TableError;
use crate::events::{EventBus, TableNotice};
use crate::timer::RoundTimer;

pub type TableId = String;

/// Consistent point-in-time view of a table, without hole cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub table_id: TableId,
    pub phase: Phase,
    pub hand_number: u64,
    pub pot: u32,
    pub bets: u32,
    pub bet: u32,
    /// Smallest bet or raise increment allowed right now.
    pub min_raise: u32,
    /// Chips the player to act needs to call.
    pub to_call: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub board: Vec<Card>,
    pub players: Vec<SeatView>,
    pub dealer: Option<String>,
    pub current_player: Option<String>,
    pub turn_id: u64,
}

#[derive(Debug)]
struct ArmedTimer {
    turn_id: u64,
    timer: RoundTimer,
}

#[derive(Debug)]
struct HandleInner {
    id: TableId,
    table: RwLock<Table>,
    bus: EventBus,
    tick: Duration,
    timer: Mutex<Option<ArmedTimer>>,
}

/// Cloneable handle to a table shared between callers and its turn timer.
///
/// Every mutation runs under the table's write lock. Events the engine
/// recorded during the mutation are forwarded to tracing and the
/// [`EventBus`] before the lock is released, so subscribers see them in
/// sequence order. While betting is open a
/// [`RoundTimer`] runs for the player to act; its expiry goes through
/// [`TableHandle::expire_turn`] with the turn id it was armed for, so an
/// action that lands first turns the expiry into a no-op.
#[derive(Debug, Clone)]
pub struct TableHandle {
    inner: Arc<HandleInner>,
}

impl TableHandle {
    /// Wraps `table`; events it already recorded (a restored table's
    /// cancelled hand, for instance) go out to subscribers right away.
    pub fn new(id: impl Into<TableId>, mut table: Table, bus: EventBus, tick: Duration) -> Self {
        let pending = table.events().since(0).to_vec();
        let last = table.events().last_seq();
        table.truncate_events_through(last);

        let handle = Self {
            inner: Arc::new(HandleInner {
                id: id.into(),
                table: RwLock::new(table),
                bus,
                tick,
                timer: Mutex::new(None),
            }),
        };
        for entry in pending {
            handle.forward(entry);
        }
        handle
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    // ---- commands ------------------------------------------------------

    pub fn seat(&self, name: &str, budget: u32) -> Result<(), TableError> {
        self.mutate("seat", |table| table.seat(name, budget))
    }

    pub fn mark_ready(&self, name: &str) -> Result<(), TableError> {
        self.mutate("mark_ready", |table| table.mark_ready(name))
    }

    pub fn leave(&self, name: &str) -> Result<(), TableError> {
        self.mutate("leave", |table| table.leave(name))
    }

    pub fn start(&self) -> Result<StartInfo, TableError> {
        self.mutate("start", Table::start)
    }

    pub fn act(&self, name: &str, action: PlayerAction) -> Result<ActionOutcome, TableError> {
        self.mutate("act", |table| table.act(name, action))
    }

    /// Applies the timeout policy for `turn_id`.
    ///
    /// Fails with [`GameError::StaleTurn`] when the player already acted.
    pub fn expire_turn(&self, turn_id: u64) -> Result<ActionOutcome, TableError> {
        self.mutate("expire_turn", |table| table.expire_turn(turn_id))
    }

    pub fn show_down(&self) -> Result<Showdown, TableError> {
        self.mutate("show_down", Table::show_down)
    }

    /// Cancels the running hand and returns the refunded chips.
    pub fn cancel_hand(&self) -> Result<u32, TableError> {
        self.mutate("cancel_hand", Table::cancel_hand)
    }

    // ---- reads ---------------------------------------------------------

    pub fn players(&self) -> Result<Vec<SeatView>, TableError> {
        self.read(Table::players)
    }

    pub fn flipped_cards(&self) -> Result<Vec<Card>, TableError> {
        self.read(Table::flipped_cards)
    }

    pub fn hole_cards(&self, name: &str) -> Result<Vec<Card>, TableError> {
        self.read(|table| table.hole_cards(name))?
            .map_err(TableError::from)
    }

    pub fn params(&self) -> Result<GameParameters, TableError> {
        self.read(|table| table.params().clone())
    }

    pub fn phase(&self) -> Result<Phase, TableError> {
        self.read(Table::phase)
    }

    /// Player to act and the id of their turn.
    pub fn current_turn(&self) -> Result<Option<(String, u64)>, TableError> {
        self.read(|table| {
            table
                .current_player()
                .map(|name| (name.to_string(), table.turn_id()))
        })
    }

    pub fn snapshot(&self) -> Result<TableSnapshot, TableError> {
        self.read(|table| {
            let (small_blind, big_blind) = table.blinds();
            TableSnapshot {
                table_id: self.inner.id.clone(),
                phase: table.phase(),
                hand_number: table.hand_number(),
                pot: table.pot(),
                bets: table.bets(),
                bet: table.bet(),
                min_raise: table.min_raise(),
                to_call: table.to_call(),
                small_blind,
                big_blind,
                board: table.flipped_cards(),
                players: table.players(),
                dealer: table.dealer().map(str::to_string),
                current_player: table.current_player().map(str::to_string),
                turn_id: table.turn_id(),
            }
        })
    }

    pub fn record(&self) -> Result<TableRecord, TableError> {
        self.read(|table| table.to_record(&self.inner.id))
    }

    /// Whole ticks left on the running turn timer.
    pub fn timer_remaining(&self) -> Option<u64> {
        let slot = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|armed| armed.timer.is_running())
            .map(|armed| armed.timer.remaining())
    }

    // ---- internals -----------------------------------------------------

    fn read<T>(&self, f: impl FnOnce(&Table) -> T) -> Result<T, TableError> {
        let table = self
            .inner
            .table
            .read()
            .map_err(|_| TableError::StoragePoisoned)?;
        Ok(f(&table))
    }

    fn mutate<T, F>(&self, op: &'static str, f: F) -> Result<T, TableError>
    where
        F: FnOnce(&mut Table) -> Result<T, GameError>,
    {
        let result = {
            let mut table = self
                .inner
                .table
                .write()
                .map_err(|_| TableError::StoragePoisoned)?;
            let result = f(&mut table);
            let logged = table.events().since(0).to_vec();
            let last = table.events().last_seq();
            table.truncate_events_through(last);
            // forwarding and rearming under the write lock keep subscribers
            // and timers in sequence order
            for entry in logged {
                self.forward(entry);
            }
            self.rearm(&table);
            result
        };

        result.map_err(|err| {
            tracing::debug!(
                table_id = %self.inner.id,
                op,
                error = %err,
                code = err.code(),
                "table operation rejected"
            );
            TableError::Game(err)
        })
    }

    fn rearm(&self, table: &Table) {
        let mut slot = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let turn = match table.phase() {
            Phase::Betting(_) => table
                .current_player()
                .map(|player| (player.to_string(), table.turn_id())),
            _ => None,
        };

        let Some((player, turn_id)) = turn else {
            if let Some(armed) = slot.take() {
                armed.timer.cancel();
            }
            return;
        };
        if slot.as_ref().is_some_and(|armed| armed.turn_id == turn_id) {
            return;
        }
        if let Some(armed) = slot.take() {
            armed.timer.cancel();
        }
        if tokio::runtime::Handle::try_current().is_err() {
            tracing::warn!(
                table_id = %self.inner.id,
                player = %player,
                "no async runtime, turn timer not armed"
            );
            return;
        }

        let seconds = table.params().turn_seconds;
        let weak: Weak<HandleInner> = Arc::downgrade(&self.inner);
        let timer = RoundTimer::start(seconds, self.inner.tick, move || {
            if let Some(inner) = weak.upgrade() {
                TableHandle { inner }.on_turn_expired(turn_id);
            }
        });
        tracing::debug!(
            table_id = %self.inner.id,
            player = %player,
            turn_id,
            seconds,
            "turn timer armed"
        );
        *slot = Some(ArmedTimer { turn_id, timer });
    }

    fn on_turn_expired(&self, turn_id: u64) {
        match self.expire_turn(turn_id) {
            Ok(outcome) => tracing::info!(
                table_id = %self.inner.id,
                player = %outcome.player,
                turn_id,
                action = ?outcome.action,
                "turn timed out"
            ),
            Err(TableError::Game(GameError::StaleTurn(_))) => {
                tracing::debug!(table_id = %self.inner.id, turn_id, "stale turn timer ignored");
            }
            Err(err) => tracing::warn!(
                table_id = %self.inner.id,
                turn_id,
                error = %err,
                "turn expiry failed"
            ),
        }
    }

    fn forward(&self, entry: LoggedEvent) {
        let table_id = self.inner.id.as_str();
        match &entry.event {
            TableEvent::HandStarted { hand, dealer, .. } => {
                tracing::info!(table_id, hand, dealer = %dealer, "hand started");
            }
            TableEvent::ActionTaken {
                player,
                street,
                action,
                amount,
            } => {
                tracing::info!(
                    table_id,
                    player = %player,
                    street = ?street,
                    action = ?action,
                    amount,
                    "player acted"
                );
            }
            TableEvent::PotAwarded { player, amount } => {
                tracing::info!(table_id, player = %player, pot = amount, "pot awarded");
            }
            TableEvent::HandCancelled { refunded } => {
                tracing::info!(table_id, refunded, "hand cancelled");
            }
            other => {
                tracing::debug!(table_id, seq = entry.seq, event = ?other, "table event");
            }
        }
        self.inner.bus.broadcast(TableNotice::new(table_id, entry));
    }
}
