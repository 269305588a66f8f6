//! Core functionality for model-based journey testing.
//!
//! This crate provides the generators, integrated shrinking and property
//! runner, plus the state machine harness that replays command journeys
//! against a system under test and its model in lockstep.

pub mod data;
pub mod engine;
pub mod error;
pub mod gen;
pub mod journeys;
pub mod property;
pub mod range;
pub mod shrink;
pub mod state;
pub mod tree;

// Re-export the main types
pub use data::*;
pub use engine::*;
pub use error::*;
pub use gen::*;
pub use journeys::*;
pub use property::*;
pub use range::*;
pub use state::*;
pub use tree::*;
