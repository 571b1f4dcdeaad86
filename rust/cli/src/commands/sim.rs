//! `sim` command: seats `p1..pN` at one table and plays hands with a random
//! policy until the hand limit or a single player remains.
//!
//! Hands are driven through [`TableManager`] the same way a live table is,
//! so every hand history is built from the table's event stream.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_board, format_ranking};
use crate::ui;
use holdem_engine::events::LoggedEvent;
use holdem_engine::logger::{HandLogger, HandRecord};
use holdem_engine::player::PlayerAction;
use holdem_service::{
    InMemoryDirectory, MemoryTableStore, ServiceSettings, TableHandle, TableManager,
    TableSnapshot,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

pub fn handle_sim_command(
    players: Option<usize>,
    hands: u64,
    seed: Option<u64>,
    output: Option<PathBuf>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = match config::load_with_sources() {
        Ok(resolved) => resolved.config,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };
    let players = players.unwrap_or(cfg.players);
    let params = cfg.parameters(players);
    if let Err(e) = params.validate() {
        ui::write_error(err, &e.to_string())?;
        return Err(CliError::InvalidInput(e.to_string()));
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    // timers need a runtime to arm against; it is never driven, so turns
    // only end through the random policy
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let _guard = runtime.enter();

    let names: Vec<String> = (1..=players).map(|i| format!("p{}", i)).collect();
    let directory = Arc::new(InMemoryDirectory::new());
    for name in &names {
        directory.register(name, u64::from(params.buy_in))?;
    }
    let settings = ServiceSettings {
        default_parameters: params.clone(),
        ..ServiceSettings::default()
    };
    let manager = TableManager::new(settings, directory, Arc::new(MemoryTableStore::new()))?;
    let table = manager.create_seeded_table(None, seed)?;
    let mut events = manager.subscribe(table.id())?;
    for name in &names {
        manager.seat_player(table.id(), name)?;
        table.mark_ready(name)?;
    }

    let mut logger = match &output {
        Some(path) => HandLogger::create(path)?,
        None => HandLogger::detached(&chrono::Utc::now().format("%Y%m%d").to_string()),
    };
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut busted: Vec<String> = Vec::new();
    let mut played = 0u64;

    writeln!(out, "Seed: {} | players: {}", seed, players)?;
    while played < hands {
        if table.players()?.len() < 2 {
            break;
        }
        table.start()?;
        play_betting(&table, &mut rng)?;
        let showdown = table.show_down()?;
        played += 1;

        let logged: Vec<LoggedEvent> = events
            .drain()
            .into_iter()
            .map(|n| LoggedEvent {
                seq: n.seq,
                ts: n.ts,
                event: n.event,
            })
            .collect();
        let record = HandRecord::from_hand(logger.next_id(), &logged, &showdown);
        logger.write(&record)?;

        writeln!(
            out,
            "Hand {}: board {} | {}",
            showdown.hand,
            format_board(&showdown.board),
            format_ranking(&showdown.ranking)
        )?;
        for award in &showdown.awards {
            writeln!(out, "  {} wins {}", award.player, award.amount)?;
        }
        for name in &showdown.busted {
            writeln!(out, "  {} is out", name)?;
        }
        tracing::debug!(
            hand = showdown.hand,
            actions = record.actions.len(),
            winners = ?showdown.winners(),
            "hand simulated"
        );
        busted.extend(showdown.busted.iter().cloned());
    }

    if played < hands {
        ui::display_warning(
            err,
            &format!("one player left after {} of {} hands", played, hands),
        )?;
    }

    let mut remaining: Vec<(String, u32)> = table
        .players()?
        .into_iter()
        .map(|p| (p.name, p.budget))
        .collect();
    remaining.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let standings: Vec<String> = remaining
        .into_iter()
        .map(|(name, _)| name)
        .chain(busted.into_iter().rev())
        .collect();
    let prize_pool = params.buy_in.saturating_mul(players as u32);
    let shares = params.prize_shares(prize_pool);
    writeln!(out, "Standings:")?;
    for (pos, name) in standings.iter().enumerate() {
        let prize = shares.get(pos).copied().unwrap_or(0);
        writeln!(out, "  {}. {} (prize {})", pos + 1, name, prize)?;
    }
    writeln!(out, "Simulated: {} hands", played)?;
    Ok(())
}

fn play_betting(table: &TableHandle, rng: &mut ChaCha20Rng) -> Result<(), CliError> {
    while let Some((name, _)) = table.current_turn()? {
        let snapshot = table.snapshot()?;
        let action = choose_action(&snapshot, rng);
        table.act(&name, action)?;
    }
    Ok(())
}

fn choose_action(snapshot: &TableSnapshot, rng: &mut ChaCha20Rng) -> PlayerAction {
    let step = snapshot.min_raise.max(1);
    let roll = rng.random_range(0..100u32);
    if snapshot.to_call == 0 {
        match roll {
            0..=64 => PlayerAction::Check,
            65..=96 => PlayerAction::Bet(step.saturating_mul(rng.random_range(1..=3u32))),
            _ => PlayerAction::AllIn,
        }
    } else {
        match roll {
            0..=29 => PlayerAction::Fold,
            30..=84 => PlayerAction::Call,
            85..=97 => PlayerAction::Raise(step.saturating_mul(rng.random_range(1..=2u32))),
            _ => PlayerAction::AllIn,
        }
    }
}
