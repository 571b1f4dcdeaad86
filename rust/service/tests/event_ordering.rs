/// Event delivery order when several callers share one table handle.
use holdem_engine::config::GameParameters;
use holdem_engine::table::Table;
use holdem_service::{EventBus, TableHandle};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const THREADS: usize = 8;
const ROUNDS: usize = 500;

#[test]
fn concurrent_commands_reach_subscribers_in_sequence_order() {
    let params = GameParameters {
        min_players: 2,
        max_players: 10,
        ..GameParameters::default()
    };
    let table = Table::with_seed(params, 3).expect("table");
    // room for every event so the subscriber is never pruned
    let bus = EventBus::with_buffer(THREADS * ROUNDS * 4);
    let handle = TableHandle::new("busy", table, bus.clone(), Duration::from_secs(1));
    let mut sub = bus.subscribe("busy");

    let handle = Arc::new(handle);
    let workers: Vec<_> = (0..THREADS)
        .map(|i| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                let name = format!("p{}", i);
                for _ in 0..ROUNDS {
                    handle.seat(&name, 100).expect("seat");
                    handle.leave(&name).expect("leave");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker");
    }

    let seqs: Vec<u64> = sub.drain().iter().map(|n| n.seq).collect();
    assert_eq!(seqs.len(), THREADS * ROUNDS * 2);
    assert!(
        seqs.windows(2).all(|w| w[0] < w[1]),
        "events delivered out of sequence order"
    );
    assert!(handle.players().unwrap().is_empty());
}
