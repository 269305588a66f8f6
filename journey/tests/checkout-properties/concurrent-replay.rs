//! Materialized traces are plain data and replay independently on threads.

use journey::checkout::{Checkout, Command};
use journey::*;
use std::rc::Rc;
use std::thread;

pub fn test_materialized_traces_replay_on_threads() {
    let gen = valid_journey(Rc::new(Checkout::new()));
    let traces: Vec<Vec<Command>> = (0..16)
        .map(|seed| {
            gen.generate(Size(20), Seed::from_u64(seed))
                .value
                .commands()
                .collect()
        })
        .collect();

    let outcomes: Vec<(usize, usize)> = thread::scope(|scope| {
        let handles: Vec<_> = traces
            .iter()
            .map(|trace| {
                scope.spawn(move || {
                    let machine = Checkout::new();
                    let replayed =
                        replay(&machine, trace.iter().cloned(), Mode::ValidByConstruction)
                            .map_err(|failure| failure.to_string())?;
                    Ok::<_, String>((replayed.applied.len(), replayed.skipped))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("replay thread panicked").unwrap())
            .collect()
    });

    for ((applied, skipped), trace) in outcomes.into_iter().zip(&traces) {
        assert_eq!(applied, trace.len());
        assert_eq!(skipped, 0);
    }
}
