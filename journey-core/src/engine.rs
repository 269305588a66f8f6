//! Lockstep replay of commands against a SUT and its model.

use crate::error::JourneyError;
use crate::state::{StateMachine, Step};
use std::fmt;

/// How replay treats a command whose precondition does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Skip it: no adapter call, no transition, no check.
    Unconstrained,
    /// The generator promised it could not happen, so it is an error.
    ValidByConstruction,
}

/// A replay that got through without a failure.
pub struct Replay<M: StateMachine> {
    /// Steps that were applied, in order.
    pub applied: Vec<Step<M::Model, M::Command>>,
    /// Commands skipped because their precondition failed.
    pub skipped: usize,
    /// Commands taken from the input, applied or skipped.
    pub consumed: usize,
    /// Whether replay stopped because the SUT reached a terminal state.
    pub terminated_early: bool,
    pub model: M::Model,
    pub sut: M::Sut,
}

impl<M: StateMachine> fmt::Debug for Replay<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replay")
            .field("applied", &self.applied)
            .field("skipped", &self.skipped)
            .field("consumed", &self.consumed)
            .field("terminated_early", &self.terminated_early)
            .field("model", &self.model)
            .field("sut", &self.sut)
            .finish()
    }
}

/// A failed replay.
pub struct Counterexample<M: StateMachine> {
    pub error: JourneyError,
    /// Applied steps up to and including the failing one.
    pub trace: Vec<Step<M::Model, M::Command>>,
    /// SUT at the point of failure.
    pub sut: M::Sut,
    /// Model at the point of failure.
    pub model: M::Model,
}

impl<M: StateMachine> fmt::Debug for Counterexample<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counterexample")
            .field("error", &self.error)
            .field("trace", &self.trace)
            .field("sut", &self.sut)
            .field("model", &self.model)
            .finish()
    }
}

impl<M: StateMachine> Counterexample<M> {
    /// The applied steps, numbered, then the SUT and model at the point of
    /// failure. Every line starts on a new line.
    pub fn report(&self) -> String {
        let mut report = String::new();
        for (index, step) in self.trace.iter().enumerate() {
            report.push_str(&format!("\n  {index}. {step}"));
        }
        report.push_str(&format!("\n  sut: {:?}", self.sut));
        report.push_str(&format!("\n  model: {:?}", self.model));
        report
    }
}

impl<M: StateMachine> fmt::Display for Counterexample<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.error, self.report())
    }
}

/// Replay `commands` from a fresh model and SUT.
///
/// Stops at the first failure or as soon as the SUT is terminal; commands
/// after that point are never pulled from the iterator.
pub fn replay<M, I>(
    machine: &M,
    commands: I,
    mode: Mode,
) -> Result<Replay<M>, Box<Counterexample<M>>>
where
    M: StateMachine,
    I: IntoIterator<Item = M::Command>,
{
    let mut model = machine.initial_model();
    let mut sut = machine.initial_sut();
    let mut applied = Vec::new();
    let mut skipped = 0;
    let mut consumed = 0;

    for (index, command) in commands.into_iter().enumerate() {
        consumed += 1;

        if !machine.precondition(&model, &command) {
            match mode {
                Mode::Unconstrained => {
                    tracing::trace!(step = index, %command, "precondition failed, skipping");
                    skipped += 1;
                    continue;
                }
                Mode::ValidByConstruction => {
                    let error = JourneyError::PreconditionViolated {
                        step: index,
                        command: command.to_string(),
                    };
                    applied.push(Step::new(model.clone(), command));
                    return Err(counterexample(error, applied, sut, model));
                }
            }
        }

        let next_sut = match machine.execute(&sut, &command) {
            Ok(next) => next,
            Err(reason) => {
                let error = JourneyError::MalformedAdapterCall {
                    step: index,
                    reason: reason.to_string(),
                };
                applied.push(Step::new(model.clone(), command));
                return Err(counterexample(error, applied, sut, model));
            }
        };
        let next_model = machine.transition(&model, &command);
        tracing::debug!(step = index, %command, "applied");

        applied.push(Step::new(model, command));
        model = next_model;
        sut = next_sut;

        if let Err(divergence) = machine.invariant(&sut, &model) {
            let command = applied
                .last()
                .map(|step| step.command.to_string())
                .unwrap_or_default();
            let error = JourneyError::InvariantViolated {
                step: index,
                command,
                diagnostic: divergence.to_string(),
            };
            return Err(counterexample(error, applied, sut, model));
        }

        if machine.is_terminal(&sut) {
            tracing::debug!(step = index, "terminal state reached");
            return Ok(Replay {
                applied,
                skipped,
                consumed,
                terminated_early: true,
                model,
                sut,
            });
        }
    }

    Ok(Replay {
        applied,
        skipped,
        consumed,
        terminated_early: false,
        model,
        sut,
    })
}

fn counterexample<M: StateMachine>(
    error: JourneyError,
    trace: Vec<Step<M::Model, M::Command>>,
    sut: M::Sut,
    model: M::Model,
) -> Box<Counterexample<M>> {
    tracing::debug!(%error, steps = trace.len(), "counterexample found");
    Box::new(Counterexample {
        error,
        trace,
        sut,
        model,
    })
}
