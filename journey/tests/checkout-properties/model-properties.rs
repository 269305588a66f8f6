//! Properties of the checkout model and reduction resolution.

use crate::arbitrary_seed;
use journey::checkout::{generators, resolve_reduction, Checkout, Item, Model};
use journey::*;
use std::rc::Rc;

fn item_and_amount() -> Gen<(Item, u32)> {
    Gen::<(Item, u32)>::tuple_of(generators::item(), Gen::<u32>::from_range(Range::new(0, 200)))
}

/// Property: reducing a freshly added item by its full quantity removes the key
pub fn test_add_then_full_reduce_removes_key() {
    let prop = for_all_named(item_and_amount(), "case", |(item, _): &(Item, u32)| {
        let model = Model::new().add_item(item).reduce_item(&item.id, item.quantity);
        model.quantity(&item.id).is_none() && model.items.is_empty() && model.ever_had_item
    });

    match prop.run(&Config::default()) {
        TestResult::Pass { .. } => (),
        result => panic!("Full reduction property failed: {result}"),
    }
}

/// Property: a resolved reduction lies in 1..=quantity and leaves the rest
pub fn test_partial_reduce_leaves_remainder() {
    let prop = for_all_named(item_and_amount(), "case", |(item, amount): &(Item, u32)| {
        let model = Model::new().add_item(item);
        let lines = model.items.iter().map(|(id, quantity)| (id.as_str(), *quantity));
        let Some((id, resolved)) = resolve_reduction(lines, 0, *amount) else {
            return false;
        };
        if !(1..=item.quantity).contains(&resolved) {
            return false;
        }

        let reduced = model.reduce_item(id, resolved);
        if resolved < item.quantity {
            reduced.quantity(&item.id) == Some(item.quantity - resolved)
        } else {
            reduced.quantity(&item.id).is_none()
        }
    });

    match prop.run(&Config::default()) {
        TestResult::Pass { .. } => (),
        result => panic!("Partial reduction property failed: {result}"),
    }
}

/// Property: once a journey has held an item, `ever_had_item` stays set
pub fn test_ever_had_item_is_monotonic() {
    let machine = Rc::new(Checkout::new());
    let gen = valid_journey(machine);
    let prop = for_all_named(arbitrary_seed(), "seed", move |&seed: &Seed| {
        let journey = gen.generate(Size(30), seed).value;
        let mut seen = false;
        for step in journey.steps() {
            if seen && !step.model_before.ever_had_item {
                return false;
            }
            seen = step.model_before.ever_had_item;
        }
        true
    });

    match prop.run(&Config::default().with_tests(50).with_shrinks(5)) {
        TestResult::Pass { .. } => (),
        result => panic!("ever_had_item monotonicity failed: {result}"),
    }
}
