//! Unconstrained command lists and their shrinkers.

use crate::{arbitrary_seed, short_journeys};
use journey::checkout::{Checkout, Command};
use journey::*;
use std::rc::Rc;

/// Property: the commands replay applies form a valid journey on their own
pub fn test_applied_subsequence_is_valid() {
    let machine = Rc::new(Checkout::new());
    let gen = unconstrained(machine.as_ref(), &short_journeys()).expect("checkout has commands");
    let prop = for_all_named(gen, "commands", move |commands: &Vec<Command>| {
        let Ok(first) = replay(machine.as_ref(), commands.iter().cloned(), Mode::Unconstrained)
        else {
            return false;
        };
        let applied: Vec<Command> = first.applied.iter().map(|step| step.command.clone()).collect();

        match replay(machine.as_ref(), applied.clone(), Mode::ValidByConstruction) {
            Ok(second) => {
                second.skipped == 0
                    && second.applied == first.applied
                    && second.model == first.model
                    && second.sut == first.sut
            }
            Err(_) => false,
        }
    });

    match prop.run(&Config::default()) {
        TestResult::Pass { .. } => (),
        result => panic!("Applied subsequence was not valid: {result}"),
    }
}

/// Property: unconstrained journeys pass against the correct service
pub fn test_correct_service_passes() {
    for shrink in [ShrinkStrategy::Structural, ShrinkStrategy::SingleDeletion] {
        let config = short_journeys().with_shrink(shrink);
        let prop = unconstrained_property(Rc::new(Checkout::new()), &config)
            .expect("checkout has commands");
        let result = prop.run(&Config::default());
        assert!(result.is_pass(), "{shrink:?}: {result}");
    }
}

/// Property: single deletion offers one candidate per command, in order
pub fn test_single_deletion_candidates() {
    let config = short_journeys().with_shrink(ShrinkStrategy::SingleDeletion);
    let gen = unconstrained(&Checkout::new(), &config).expect("checkout has commands");
    let prop = for_all_named(arbitrary_seed(), "seed", move |&seed: &Seed| {
        let tree = gen.generate(Size(10), seed);
        let original = &tree.value;
        let candidates = tree.shrinks();

        candidates.len() == original.len()
            && candidates.iter().enumerate().all(|(index, candidate)| {
                let mut expected = original.clone();
                expected.remove(index);
                *candidate == expected
            })
    });

    match prop.run(&Config::default().with_tests(30).with_shrinks(5)) {
        TestResult::Pass { .. } => (),
        result => panic!("Single deletion candidates were wrong: {result}"),
    }
}
