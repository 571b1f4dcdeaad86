use std::fs;
use std::path::PathBuf;

use holdem_engine::config::GameParameters;
use holdem_engine::logger::{HandLogger, HandRecord};
use holdem_engine::player::PlayerAction;
use holdem_engine::table::Table;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn played_hand() -> (Table, HandRecord) {
    let params = GameParameters {
        min_players: 2,
        ..GameParameters::default()
    };
    let mut table = Table::with_seed(params, 3).unwrap();
    for name in ["a", "b", "c"] {
        table.seat(name, 500).unwrap();
        table.mark_ready(name).unwrap();
    }
    let from = table.events().last_seq();
    table.start().unwrap();
    table.act("a", PlayerAction::Fold).unwrap();
    table.act("b", PlayerAction::Fold).unwrap();
    let showdown = table.show_down().unwrap();
    let record = HandRecord::from_hand(
        "20260101-000001".to_string(),
        table.events().since(from),
        &showdown,
    );
    (table, record)
}

#[test]
fn record_collects_actions_and_winner() {
    let (_, record) = played_hand();
    assert_eq!(record.actions.len(), 2);
    assert!(record.actions.iter().all(|a| a.action == PlayerAction::Fold));
    assert_eq!(record.showdown.as_ref().unwrap().winners, vec!["c".to_string()]);
    assert_eq!(record.result.as_deref(), Some("c wins 30"));
    assert!(record.board.is_empty());
}

#[test]
fn writes_jsonl_with_lf_only() {
    let path = tmp_path("handlog");
    let _ = fs::remove_file(&path);
    let (_, record) = played_hand();
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&record).expect("write");
    logger.write(&record).expect("write");

    let text = fs::read_to_string(&path).expect("read file");
    assert!(text.ends_with('\n'));
    assert!(!text.contains('\r'));
    assert_eq!(text.lines().count(), 2);

    let back: HandRecord = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert!(back.ts.is_some());
    assert_eq!(back.actions, record.actions);
    let _ = fs::remove_file(&path);
}
