use holdem_cli::run;
use serial_test::serial;
use std::fs;

fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("HOLDEM_") {
            unsafe { std::env::remove_var(&key) };
        }
    }
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut argv = vec!["holdem"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
#[serial]
fn same_seed_plays_the_same_hands() {
    clear_env();
    let args = ["sim", "--players", "4", "--hands", "8", "--seed", "7"];
    let (code_a, out_a, _) = run_cli(&args);
    let (code_b, out_b, _) = run_cli(&args);
    assert_eq!(code_a, 0);
    assert_eq!(code_b, 0);
    assert_eq!(out_a, out_b);
    assert!(out_a.starts_with("Seed: 7 | players: 4"));
    assert!(out_a.contains("Hand 1: board ["));
    assert!(out_a.contains("Standings:"));
}

#[test]
#[serial]
fn writes_one_record_per_hand() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands").join("sim.jsonl");
    let (code, out, _) = run_cli(&[
        "sim",
        "--players",
        "3",
        "--hands",
        "5",
        "--seed",
        "11",
        "--output",
        path.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);

    let played = out.lines().filter(|l| l.starts_with("Hand ")).count();
    let contents = fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = contents
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), played);
    assert!(out.contains(&format!("Simulated: {} hands", played)));
    for (i, record) in records.iter().enumerate() {
        let id = record["hand_id"].as_str().unwrap();
        assert!(id.ends_with(&format!("-{:06}", i + 1)));
        assert!(record["ts"].is_string());
        assert!(record["showdown"]["winners"].as_array().is_some_and(|w| !w.is_empty()));
    }
}

#[test]
#[serial]
fn standings_list_every_player_once() {
    clear_env();
    let (code, out, _) = run_cli(&["sim", "--players", "3", "--hands", "40", "--seed", "3"]);
    assert_eq!(code, 0);
    let standings: Vec<&str> = out
        .lines()
        .skip_while(|l| *l != "Standings:")
        .skip(1)
        .take_while(|l| l.starts_with("  "))
        .collect();
    assert_eq!(standings.len(), 3);
    for name in ["p1", "p2", "p3"] {
        assert_eq!(standings.iter().filter(|l| l.contains(name)).count(), 1);
    }
    assert!(standings[0].starts_with("  1. "));
}

#[test]
#[serial]
fn players_default_to_config() {
    clear_env();
    unsafe { std::env::set_var("HOLDEM_PLAYERS", "2") };
    let (code, out, _) = run_cli(&["sim", "--hands", "1", "--seed", "5"]);
    clear_env();
    assert_eq!(code, 0);
    assert!(out.starts_with("Seed: 5 | players: 2"));
}

#[test]
#[serial]
fn zero_hands_is_rejected() {
    clear_env();
    let (code, _, err) = run_cli(&["sim", "--hands", "0"]);
    assert_eq!(code, 2);
    assert!(err.contains("hands must be >= 1"));
}

#[test]
#[serial]
fn too_many_players_is_rejected() {
    clear_env();
    let (code, _, _) = run_cli(&["sim", "--players", "23", "--hands", "1", "--seed", "1"]);
    assert_eq!(code, 2);
}
