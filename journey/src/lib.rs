//! Model-based journey testing.
//!
//! This is the main entry point: it re-exports the generators, property
//! runner and replay harness from `journey-core`, and ships the checkout
//! basket as a worked example of a [`StateMachine`].

pub use journey_core::*;

pub mod checkout;
