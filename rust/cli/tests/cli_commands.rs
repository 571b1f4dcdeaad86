use holdem_cli::run;
use serial_test::serial;
use std::fs;

const ENV_KEYS: &[&str] = &[
    "HOLDEM_CONFIG",
    "HOLDEM_PLAYERS",
    "HOLDEM_SEED",
    "HOLDEM_TOKENS",
    "HOLDEM_SMALL_BLIND",
    "HOLDEM_BLIND_INCREASE",
    "HOLDEM_TURN_SECONDS",
    "HOLDEM_TIMEOUT_POLICY",
];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe { std::env::remove_var(key) };
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
fn cfg_reports_defaults() {
    clear_env();
    let (code, out, _) = run_cli(&["cfg"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["players"]["value"], 5);
    assert_eq!(json["players"]["source"], "default");
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["timeout_policy"]["source"], "default");
}

#[test]
#[serial]
fn env_overrides_file_which_overrides_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holdem.toml");
    fs::write(&path, "players = 4\nsmall_blind = 5\n").unwrap();
    unsafe {
        std::env::set_var("HOLDEM_CONFIG", &path);
        std::env::set_var("HOLDEM_PLAYERS", "6");
        std::env::set_var("HOLDEM_SEED", "42");
    }

    let (code, out, _) = run_cli(&["cfg"]);
    clear_env();
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["players"]["value"], 6);
    assert_eq!(json["players"]["source"], "env");
    assert_eq!(json["small_blind"]["value"], 5);
    assert_eq!(json["small_blind"]["source"], "file");
    assert_eq!(json["seed"]["value"], 42);
    assert_eq!(json["tokens"]["source"], "default");
}

#[test]
#[serial]
fn invalid_env_value_exits_with_error() {
    clear_env();
    unsafe { std::env::set_var("HOLDEM_PLAYERS", "many") };
    let (code, out, err) = run_cli(&["cfg"]);
    clear_env();
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("HOLDEM_PLAYERS"));
}

#[test]
#[serial]
fn missing_config_file_exits_with_error() {
    clear_env();
    unsafe { std::env::set_var("HOLDEM_CONFIG", "/nonexistent/holdem.toml") };
    let (code, _, err) = run_cli(&["cfg"]);
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("cannot read config file"));
}

#[test]
fn rank_lists_players_best_first() {
    let (code, out, _) = run_cli(&[
        "rank",
        "--hand",
        "ann=2c3d4h5s7c",
        "--hand",
        "bob=AsKsQsJsTs",
        "--hand",
        "cat=AhKhQhJhTh",
    ]);
    assert_eq!(code, 0);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("1. bob - royal flush"));
    assert!(lines[1].starts_with("1. cat - royal flush"));
    assert!(lines[2].starts_with("3. ann - high card"));
}

#[test]
fn rank_rejects_bad_cards() {
    let (code, _, err) = run_cli(&["rank", "--hand", "ann=ZzKhQhJhTh"]);
    assert_eq!(code, 2);
    assert!(err.contains("Error:"));
}

#[test]
fn unknown_command_lists_commands() {
    let (code, out, err) = run_cli(&["shuffle"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Commands:"));
    assert!(err.contains("  sim"));
}

#[test]
fn help_goes_to_stdout() {
    let (code, out, _) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("rank"));
}
