//! Checkout journeys checked with the journey harness itself.
//!
//! Each submodule exposes property functions; the `tests` module below runs
//! them.

use journey::*;

#[path = "checkout-properties/model-properties.rs"]
mod model_properties;

#[path = "checkout-properties/valid-journeys.rs"]
mod valid_journeys;

#[path = "checkout-properties/unconstrained-journeys.rs"]
mod unconstrained_journeys;

#[path = "checkout-properties/scenarios.rs"]
mod scenarios;

#[path = "checkout-properties/defects.rs"]
mod defects;

#[path = "checkout-properties/concurrent-replay.rs"]
mod concurrent_replay;

/// Helper to generate seeds for properties over generators
fn arbitrary_seed() -> Gen<Seed> {
    Gen::<u64>::from_range(Range::new(0, 10000)).map(Seed::from_u64)
}

/// Short unconstrained journeys keep replay and shrinking fast.
fn short_journeys() -> JourneyConfig {
    JourneyConfig::default().with_length(10..=60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_add_then_reduce() {
        model_properties::test_add_then_full_reduce_removes_key();
        model_properties::test_partial_reduce_leaves_remainder();
    }

    #[test]
    fn checkout_ever_had_item_is_monotonic() {
        model_properties::test_ever_had_item_is_monotonic();
    }

    #[test]
    fn checkout_valid_journeys_never_skip() {
        valid_journeys::test_valid_journeys_never_skip();
    }

    #[test]
    fn checkout_valid_journeys_pass_with_correct_service() {
        valid_journeys::test_correct_service_passes();
    }

    #[test]
    fn checkout_valid_journey_shrinks_stay_valid() {
        valid_journeys::test_shrinks_stay_valid();
    }

    #[test]
    fn checkout_valid_journey_display() {
        valid_journeys::snapshot_journey_display();
    }

    #[test]
    fn checkout_applied_subsequence_is_valid() {
        unconstrained_journeys::test_applied_subsequence_is_valid();
    }

    #[test]
    fn checkout_unconstrained_passes_with_correct_service() {
        unconstrained_journeys::test_correct_service_passes();
    }

    #[test]
    fn checkout_single_deletion_candidates() {
        unconstrained_journeys::test_single_deletion_candidates();
    }

    #[test]
    fn checkout_reduce_everything_then_address() {
        scenarios::test_reduce_everything_then_address();
    }

    #[test]
    fn checkout_order_stops_the_journey() {
        scenarios::test_order_stops_the_journey();
    }

    #[test]
    fn checkout_empty_lines_are_caught_and_shrunk() {
        defects::test_keep_empty_lines_is_caught();
    }

    #[test]
    fn checkout_payment_reset_is_caught() {
        defects::test_address_resets_payment_is_caught_by_valid_journeys();
        defects::test_address_resets_payment_is_caught_by_single_deletion();
    }

    #[test]
    fn checkout_recheck_reproduces_failure() {
        defects::test_recheck_reproduces_failure();
    }

    #[test]
    fn checkout_materialized_traces_replay_concurrently() {
        concurrent_replay::test_materialized_traces_replay_on_threads();
    }
}
