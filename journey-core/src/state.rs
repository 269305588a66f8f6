//! State machine testing for property-based testing.
//!
//! A [`StateMachine`] describes a stateful subject under test (the SUT)
//! alongside a pure model of it. Commands are checked against the model
//! before they run, move both the SUT and the model forward, and after every
//! step an invariant ties the two together.

use crate::gen::Gen;
use std::fmt::{self, Debug, Display};

/// The pieces needed to test a stateful system against a model.
///
/// Every method is a pure function of its arguments: models and SUT states
/// are immutable values and each step produces new ones.
pub trait StateMachine {
    /// Abstract state mirroring the parts of the SUT that matter.
    type Model: Clone + Debug + 'static;
    /// The real state of the system under test.
    type Sut: Debug;
    /// The closed set of operations.
    type Command: Clone + Debug + Display + 'static;
    /// Why the SUT refused a command.
    type AdapterError: Display;
    /// Why the SUT and the model disagree.
    type Divergence: Display;

    /// Model at the start of every journey.
    fn initial_model(&self) -> Self::Model;

    /// SUT state at the start of every journey.
    fn initial_sut(&self) -> Self::Sut;

    /// Whether `command` is allowed in `model`.
    fn precondition(&self, model: &Self::Model, command: &Self::Command) -> bool;

    /// The model after `command`.
    fn transition(&self, model: &Self::Model, command: &Self::Command) -> Self::Model;

    /// Run `command` against the SUT. Never consults the model.
    fn execute(
        &self,
        sut: &Self::Sut,
        command: &Self::Command,
    ) -> Result<Self::Sut, Self::AdapterError>;

    /// Check that `sut` agrees with `model`.
    fn invariant(&self, sut: &Self::Sut, model: &Self::Model) -> Result<(), Self::Divergence>;

    /// Whether the SUT has reached a state no further command applies to.
    fn is_terminal(&self, sut: &Self::Sut) -> bool;

    /// Whether a valid journey ends at `model`.
    fn is_complete(&self, model: &Self::Model) -> bool;

    /// Generators for exactly the commands allowed in `model`.
    ///
    /// Everything drawn from these must satisfy [`StateMachine::precondition`].
    fn commands(&self, model: &Self::Model) -> Vec<Gen<Self::Command>>;

    /// Generators for every command, regardless of any model.
    fn all_commands(&self) -> Vec<Gen<Self::Command>>;
}

/// One step of a journey: the model the command was chosen against, and
/// the command.
#[derive(Clone, PartialEq, Eq)]
pub struct Step<Model, Command> {
    pub model_before: Model,
    pub command: Command,
}

impl<Model, Command> Step<Model, Command> {
    pub fn new(model_before: Model, command: Command) -> Self {
        Step {
            model_before,
            command,
        }
    }
}

impl<Model: Debug, Command: Display> Display for Step<Model, Command> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.command, self.model_before)
    }
}

impl<Model: Debug, Command: Debug> Debug for Step<Model, Command> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("model_before", &self.model_before)
            .field("command", &self.command)
            .finish()
    }
}
