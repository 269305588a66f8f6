//! Journeys that are valid by construction.

use crate::arbitrary_seed;
use journey::checkout::{Checkout, Command, Model};
use journey::*;
use std::rc::Rc;

/// Property: replaying a valid journey never skips a command and ends in an order
pub fn test_valid_journeys_never_skip() {
    let machine = Rc::new(Checkout::new());
    let gen = valid_journey(Rc::clone(&machine));
    let prop = for_all_named(gen, "journey", move |journey: &Journey<Model, Command>| {
        match replay(machine.as_ref(), journey.commands(), Mode::Unconstrained) {
            Ok(replayed) => {
                replayed.skipped == 0
                    && replayed.terminated_early
                    && replayed.consumed == journey.len()
            }
            Err(_) => false,
        }
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => (),
        result => panic!("Valid journeys skipped commands: {result}"),
    }
}

/// Property: the correct service never trips the invariant
pub fn test_correct_service_passes() {
    let result = valid_property(Rc::new(Checkout::new())).run(&Config::default());
    assert!(result.is_pass(), "{result}");
}

/// Property: every shrink of a valid journey is itself valid
pub fn test_shrinks_stay_valid() {
    let machine = Rc::new(Checkout::new());
    let gen = valid_journey(Rc::clone(&machine));
    let prop = for_all_named(arbitrary_seed(), "seed", move |&seed: &Seed| {
        let tree = gen.generate(Size(30), seed);
        tree.children().take(25).all(|child| {
            let model_before: Vec<Model> =
                child.value.steps().map(|step| step.model_before).collect();
            match replay(machine.as_ref(), child.value.commands(), Mode::ValidByConstruction) {
                Ok(replayed) => {
                    let applied: Vec<Model> =
                        replayed.applied.into_iter().map(|step| step.model_before).collect();
                    applied == model_before
                }
                Err(_) => false,
            }
        })
    });

    match prop.run(&Config::default().with_tests(20).with_shrinks(5)) {
        TestResult::Pass { .. } => (),
        result => panic!("Shrunk journeys lost validity: {result}"),
    }
}

pub fn snapshot_journey_display() {
    let gen = valid_journey(Rc::new(Checkout::new()));
    let journey = gen.generate(Size(10), Seed::from_u64(2024)).value;
    let rendered = journey.to_string();

    assert_eq!(rendered.lines().count(), journey.len());
    assert!(rendered.starts_with("Step: AddItem("));
    assert!(rendered.trim_end().lines().last().unwrap().starts_with("Step: CreateOrder"));
    archetype::snap("checkout_valid_journey_display", rendered);
}
