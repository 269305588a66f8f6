//! Seeded basket defects must be found and shrunk.

use crate::short_journeys;
use journey::checkout::{Checkout, Defects};
use journey::*;
use std::rc::Rc;

/// Property: a line reduced to zero is caught and shrinks to one add and one reduce
pub fn test_keep_empty_lines_is_caught() {
    let machine = Rc::new(Checkout::with_defects(Defects::none().keep_empty_lines()));
    let journeys = JourneyConfig::default().with_length(0..=60);
    let prop = unconstrained_property(machine, &journeys).expect("checkout has commands");

    match prop.run(&Config::default().with_tests(200).with_seed(Seed::from_u64(23))) {
        TestResult::Fail {
            counterexample,
            assertion_type,
            shrinks_performed,
            recheck,
            ..
        } => {
            assert!(shrinks_performed > 0);
            assert!(recheck.is_some());
            assert_eq!(counterexample.matches("AddItem").count(), 1, "{counterexample}");
            assert_eq!(counterexample.matches("ReduceItem").count(), 1, "{counterexample}");
            assert!(counterexample.contains("1. ReduceItem"), "{counterexample}");
            let heading = assertion_type.unwrap_or_default();
            assert!(heading.contains("basket holds"), "{heading}");
        }
        result => panic!("Empty lines went unnoticed: {result}"),
    }
}

pub fn test_address_resets_payment_is_caught_by_valid_journeys() {
    let machine = Rc::new(Checkout::with_defects(Defects::none().address_resets_payment()));

    match valid_property(machine).run(&Config::default().with_tests(200)) {
        TestResult::Fail {
            counterexample,
            assertion_type,
            ..
        } => {
            assert!(counterexample.contains("AddPaymentDetails"), "{counterexample}");
            let heading = assertion_type.unwrap_or_default();
            assert!(heading.contains("payment details"), "{heading}");
        }
        result => panic!("Payment reset went unnoticed: {result}"),
    }
}

pub fn test_address_resets_payment_is_caught_by_single_deletion() {
    let machine = Rc::new(Checkout::with_defects(Defects::none().address_resets_payment()));
    let config = short_journeys().with_shrink(ShrinkStrategy::SingleDeletion);
    let prop = unconstrained_property(machine, &config).expect("checkout has commands");

    match prop.run(&Config::default().with_tests(200)) {
        TestResult::Fail { counterexample, .. } => {
            assert!(counterexample.matches("AddAddress").count() >= 2, "{counterexample}");
            assert!(counterexample.contains("AddPaymentDetails"), "{counterexample}");
            assert!(!counterexample.contains("CreateOrder"), "{counterexample}");
        }
        result => panic!("Payment reset went unnoticed: {result}"),
    }
}

pub fn test_recheck_reproduces_failure() {
    let machine = Rc::new(Checkout::with_defects(Defects::none().keep_empty_lines()));
    let prop = unconstrained_property(machine, &short_journeys()).expect("checkout has commands");

    let first = prop.run(&Config::default().with_tests(200).with_seed(Seed::from_u64(17)));
    let encoded = first
        .recheck_data()
        .expect("the defect should be found")
        .encode();

    let data: RecheckData = encoded.parse().expect("encoded recheck data parses");
    let again = prop.recheck(&data).expect("recorded shrink path exists");

    match (first, again) {
        (
            TestResult::Fail {
                counterexample: a,
                assertion_type: heading_a,
                ..
            },
            TestResult::Fail {
                counterexample: b,
                assertion_type: heading_b,
                recheck,
                ..
            },
        ) => {
            assert_eq!(a, b);
            assert_eq!(heading_a, heading_b);
            assert_eq!(recheck.map(|data| data.encode()), Some(encoded));
        }
        other => panic!("Recheck did not reproduce the failure: {other:?}"),
    }
}
