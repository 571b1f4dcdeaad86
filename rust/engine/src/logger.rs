use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::events::{LoggedEvent, Street, TableEvent};
use crate::player::PlayerAction;
use crate::table::Showdown;

/// Records a single player action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: String,
    /// The betting street when this action occurred
    pub street: Street,
    pub action: PlayerAction,
    /// Chips the action put in
    pub amount: u32,
}

/// Information about the showdown phase when hands are revealed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Players holding rank 1
    pub winners: Vec<String>,
    /// Optional notes about the showdown (e.g., "split pot")
    #[serde(default)]
    pub notes: Option<String>,
}

/// Complete record of a hand including all actions, board cards, and outcome.
/// Serialized to JSONL format for hand history storage.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Seed of the deck the hand was dealt from
    pub seed: Option<u64>,
    /// Chronological list of all player actions
    pub actions: Vec<ActionRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    /// Hand result summary
    pub result: Option<String>,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

impl HandRecord {
    /// Builds a record from the events of one hand and its showdown.
    pub fn from_hand(hand_id: String, events: &[LoggedEvent], showdown: &Showdown) -> Self {
        let actions = events
            .iter()
            .filter_map(|e| match &e.event {
                TableEvent::ActionTaken {
                    player,
                    street,
                    action,
                    amount,
                } => Some(ActionRecord {
                    player: player.clone(),
                    street: *street,
                    action: *action,
                    amount: *amount,
                }),
                _ => None,
            })
            .collect();

        let winners: Vec<String> = showdown.winners().into_iter().map(str::to_string).collect();
        let pot: u32 = showdown.awards.iter().map(|a| a.amount).sum();
        let notes = match winners.len() {
            0 | 1 => None,
            n => Some(format!("split pot between {n} players")),
        };

        Self {
            hand_id,
            seed: Some(showdown.seed),
            actions,
            board: showdown.board.clone(),
            result: Some(format!("{} wins {pot}", winners.join(", "))),
            ts: None,
            meta: serde_json::to_value(&showdown.ranking).ok(),
            showdown: Some(ShowdownInfo { winners, notes }),
        }
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`HandRecord`]s to a JSONL file, one object per line.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that numbers hands without writing anywhere.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_ids_are_sequential() {
        let mut logger = HandLogger::detached("20260101");
        assert_eq!(logger.next_id(), "20260101-000001");
        assert_eq!(logger.next_id(), "20260101-000002");
    }
}
