//! `rank` command: classify and rank hands given on the command line.
//!
//! Each `--hand` takes `NAME=CARDS`, five to seven concatenated cards such as
//! `ann=AhKhQhJhTh`. The best five cards of each hand are ranked against the
//! others; tied players share a rank and the next rank skips past them.

use crate::error::CliError;
use crate::ui;
use holdem_engine::cards::parse_cards;
use holdem_engine::classify::best_hand;
use holdem_engine::compare::{Contender, rank_contenders};
use std::io::Write;

pub fn handle_rank_command(
    hands: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut contenders = Vec::with_capacity(hands.len());
    for spec in hands {
        let (name, cards) = match parse_spec(spec) {
            Ok(parsed) => parsed,
            Err(msg) => {
                ui::write_error(err, &msg)?;
                return Err(CliError::InvalidInput(msg));
            }
        };
        let best = best_hand(&cards).map_err(|e| {
            CliError::InvalidInput(format!("{}: {}", name, e))
        })?;
        contenders.push(Contender::new(name, best.category, best.hand));
    }

    let ranking = rank_contenders(&contenders)?;
    for (name, rank) in ranking.ordered() {
        let Some(contender) = contenders.iter().find(|c| c.name == name) else {
            continue;
        };
        writeln!(
            out,
            "{}. {} - {} [{}]",
            rank, name, contender.category, contender.hand
        )?;
    }
    Ok(())
}

fn parse_spec(spec: &str) -> Result<(String, Vec<holdem_engine::cards::Card>), String> {
    let (name, cards) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=CARDS, got '{}'", spec))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing player name in '{}'", spec));
    }
    let cards = parse_cards(cards).map_err(|e| format!("{}: {}", name, e))?;
    if !(5..=7).contains(&cards.len()) {
        return Err(format!(
            "{}: expected 5 to 7 cards, got {}",
            name,
            cards.len()
        ));
    }
    Ok((name.to_string(), cards))
}
