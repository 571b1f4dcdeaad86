use serde::{Deserialize, Serialize};

use crate::config::GameParameters;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{EventLog, Street};
use crate::player::Seat;
use crate::table::{Phase, Table};

/// Persisted part of a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub name: String,
    pub budget: u32,
    pub ready: bool,
    /// Chips put in during the hand the record was taken in.
    pub committed: u32,
}

/// Flat, storage-friendly shape of a table.
///
/// The deck and the board are not persisted: a record taken in the middle of
/// a hand restores to a table where that hand was cancelled and every
/// committed chip refunded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    pub id: String,
    pub name: String,
    pub parameters: GameParameters,
    pub seats: Vec<SeatRecord>,
    pub small_blind: u32,
    pub big_blind: u32,
    pub pot: u32,
    pub bets: u32,
    pub bet: u32,
    pub street: Option<Street>,
    pub dealer: usize,
    pub small_blind_pos: usize,
    pub big_blind_pos: usize,
    pub current: usize,
    pub in_hand: bool,
    pub settled: bool,
    pub hand_number: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub last_event_seq: u64,
}

impl Table {
    pub fn to_record(&self, id: &str) -> TableRecord {
        TableRecord {
            id: id.to_string(),
            name: self.params.name.clone(),
            parameters: self.params.clone(),
            seats: self
                .seats
                .iter()
                .map(|s| SeatRecord {
                    name: s.name.clone(),
                    budget: s.budget,
                    ready: s.ready,
                    committed: s.committed,
                })
                .collect(),
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            pot: self.pot,
            bets: self.bets,
            bet: self.bet,
            street: self.phase.in_hand().then_some(self.street),
            dealer: self.dealer,
            small_blind_pos: self.small_blind_pos,
            big_blind_pos: self.big_blind_pos,
            current: self.current,
            in_hand: self.phase.in_hand(),
            settled: self.phase == Phase::Settled,
            hand_number: self.hand_number,
            seed: self.seed,
            last_event_seq: self.events.last_seq(),
        }
    }

    /// Rebuilds a table from its record.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidRecord`] when the record is inconsistent, or
    /// [`GameError::InvalidParameters`] for bad parameters.
    pub fn from_record(record: TableRecord) -> Result<Table, GameError> {
        record.parameters.validate()?;
        let n = record.seats.len();
        if n > record.parameters.max_players {
            return Err(GameError::InvalidRecord(format!(
                "{n} seats exceed capacity {}",
                record.parameters.max_players
            )));
        }
        let positions = [
            record.dealer,
            record.small_blind_pos,
            record.big_blind_pos,
            record.current,
        ];
        if n > 0 && positions.iter().any(|&p| p >= n) {
            return Err(GameError::InvalidRecord(
                "seat index out of range".to_string(),
            ));
        }
        let committed: u32 = record.seats.iter().map(|s| s.committed).sum();
        if record.in_hand && committed != record.pot.saturating_add(record.bets) {
            return Err(GameError::InvalidRecord(format!(
                "committed chips {committed} do not match pot {} and bets {}",
                record.pot, record.bets
            )));
        }
        for (i, seat) in record.seats.iter().enumerate() {
            if record.seats[i + 1..].iter().any(|s| s.name == seat.name) {
                return Err(GameError::InvalidRecord(format!(
                    "{} is seated twice",
                    seat.name
                )));
            }
        }

        let seats = record
            .seats
            .into_iter()
            .map(|s| {
                let mut seat = Seat::new(s.name, s.budget);
                seat.ready = s.ready;
                seat.committed = s.committed;
                seat
            })
            .collect();

        let mut table = Table {
            min_raise: record.big_blind,
            params: record.parameters,
            seats,
            dealer: record.dealer,
            small_blind_pos: record.small_blind_pos,
            big_blind_pos: record.big_blind_pos,
            current: record.current,
            small_blind: record.small_blind,
            big_blind: record.big_blind,
            pot: record.pot,
            bets: record.bets,
            bet: record.bet,
            phase: if record.settled {
                Phase::Settled
            } else {
                Phase::Seating
            },
            street: record.street.unwrap_or(Street::Preflop),
            hand_number: record.hand_number,
            turn_id: 0,
            flipped: Vec::new(),
            deck: Deck::new_with_seed(record.seed.unwrap_or_default()),
            seed: record.seed,
            leaving: Vec::new(),
            events: EventLog::resume_after(record.last_event_seq),
        };

        if record.in_hand {
            table.phase = Phase::Ended;
            table.cancel_hand()?;
        } else {
            table.pot = 0;
            table.bets = 0;
            table.bet = 0;
            if !record.settled {
                table.phase = if table.is_ready_to_start() {
                    Phase::Ready
                } else {
                    Phase::Seating
                };
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerAction;

    fn running_table() -> Table {
        let params = GameParameters {
            min_players: 2,
            ..GameParameters::default()
        };
        let mut table = Table::with_seed(params, 11).unwrap();
        for name in ["a", "b", "c"] {
            table.seat(name, 500).unwrap();
            table.mark_ready(name).unwrap();
        }
        table.start().unwrap();
        table
    }

    #[test]
    fn mid_hand_record_restores_with_refund() {
        let mut table = running_table();
        table.act("a", PlayerAction::Raise(40)).unwrap();
        let record = table.to_record("t1");
        assert!(record.in_hand);
        assert_eq!(record.pot + record.bets, 10 + 20 + 60);

        let restored = Table::from_record(record).unwrap();
        assert_eq!(restored.phase(), Phase::Ready);
        assert!(restored.players().iter().all(|p| p.budget == 500));
        assert_eq!(restored.pot(), 0);
        assert_eq!(restored.hand_number(), 1);
    }

    #[test]
    fn record_survives_json() {
        let table = running_table();
        let record = table.to_record("t2");
        let json = serde_json::to_string(&record).unwrap();
        let back: TableRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let mut record = running_table().to_record("t3");
        record.dealer = 9;
        assert!(matches!(
            Table::from_record(record),
            Err(GameError::InvalidRecord(_))
        ));
    }

    #[test]
    fn rejects_mismatched_chip_totals() {
        let mut record = running_table().to_record("t4");
        record.pot += 1;
        assert!(Table::from_record(record).is_err());
    }
}
