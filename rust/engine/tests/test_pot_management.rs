use holdem_engine::config::GameParameters;
use holdem_engine::events::TableEvent;
use holdem_engine::player::PlayerAction;
use holdem_engine::table::Table;

fn started_table() -> Table {
    let params = GameParameters {
        min_players: 2,
        ..GameParameters::default()
    };
    let mut table = Table::with_seed(params, 5).unwrap();
    for name in ["a", "b", "c"] {
        table.seat(name, 1_000).unwrap();
        table.mark_ready(name).unwrap();
    }
    table.start().unwrap();
    table
}

#[test]
fn update_pot_then_reset_bet_preserves_chips() {
    let mut table = started_table();
    table.act("a", PlayerAction::Raise(30)).unwrap();
    let before = table.pot() + table.bets();

    table.update_pot();
    table.reset_bet();

    assert_eq!(table.bets(), 0);
    assert_eq!(table.bet(), 0);
    assert_eq!(table.pot(), before);
    assert!(table.players().iter().all(|p| p.current_bet == 0));

    // a second pass moves nothing
    table.update_pot();
    table.reset_bet();
    assert_eq!(table.pot(), before);
}

#[test]
fn update_bet_and_bets_accumulate() {
    let mut table = started_table();
    let (bet, bets) = (table.bet(), table.bets());
    table.update_bet(15);
    table.update_bets(25);
    assert_eq!(table.bet(), bet + 15);
    assert_eq!(table.bets(), bets + 25);
}

#[test]
fn street_transition_folds_bets_into_pot() {
    let mut table = started_table();
    table.act("a", PlayerAction::Call).unwrap();
    table.act("b", PlayerAction::Call).unwrap();
    table.act("c", PlayerAction::Check).unwrap();

    assert_eq!(table.flipped_cards().len(), 3);
    assert_eq!(table.pot(), 60);
    assert_eq!(table.bets(), 0);
    assert_eq!(table.bet(), 0);

    let events: Vec<&TableEvent> = table.events().since(0).iter().map(|e| &e.event).collect();
    let pot_update = events
        .iter()
        .position(|e| matches!(e, TableEvent::PotUpdated { pot: 60 }))
        .expect("pot updated");
    assert!(matches!(events[pot_update + 1], TableEvent::BetReset));
}

#[test]
fn rotations_wrap_independently() {
    let mut table = started_table();
    assert_eq!(table.dealer(), Some("a"));
    table.set_dealer();
    table.set_dealer();
    assert_eq!(table.dealer(), Some("c"));
    table.set_dealer();
    assert_eq!(table.dealer(), Some("a"));
    assert_eq!(table.small_blind_player(), Some("b"));
    table.set_big_blind();
    assert_eq!(table.big_blind_player(), Some("a"));
    assert_eq!(table.small_blind_player(), Some("b"));
}
