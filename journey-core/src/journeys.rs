//! Journey generators: unconstrained command lists and lazily built journeys
//! that are valid by construction.

use crate::engine::{replay, Mode};
use crate::error::{Result, TestResult};
use crate::property::Property;
use crate::state::{StateMachine, Step};
use crate::{data::*, gen::*, range::Range, shrink, tree::*};
use std::cell::LazyCell;
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;

/// How unconstrained command lists shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShrinkStrategy {
    /// Drop contiguous chunks, then shrink individual commands.
    #[default]
    Structural,
    /// Only ever delete one command at a time.
    SingleDeletion,
}

/// Configuration for [`unconstrained`] journeys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyConfig {
    /// Inclusive bounds on the number of commands.
    pub length: RangeInclusive<usize>,
    pub shrink: ShrinkStrategy,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        JourneyConfig {
            length: 100..=400,
            shrink: ShrinkStrategy::Structural,
        }
    }
}

impl JourneyConfig {
    pub fn with_length(mut self, length: RangeInclusive<usize>) -> Self {
        self.length = length;
        self
    }

    pub fn with_shrink(mut self, shrink: ShrinkStrategy) -> Self {
        self.shrink = shrink;
        self
    }
}

/// Flat command lists drawn without looking at any model.
///
/// Every command comes from [`StateMachine::all_commands`] with equal
/// weight. Commands whose precondition fails are meant to be skipped at
/// replay time.
pub fn unconstrained<M>(machine: &M, config: &JourneyConfig) -> Result<Gen<Vec<M::Command>>>
where
    M: StateMachine,
{
    let command = Gen::one_of(machine.all_commands())?;
    let length = Range::new(*config.length.start(), *config.length.end());
    let commands = Gen::vec_of(command, length);

    Ok(match config.shrink {
        ShrinkStrategy::Structural => commands,
        ShrinkStrategy::SingleDeletion => {
            commands.shrink_with(|commands: &Vec<M::Command>| {
                shrink::single_deletions(commands.clone())
            })
        }
    })
}

type LazyTail<Model, Command> =
    Rc<LazyCell<Tree<Journey<Model, Command>>, Box<dyn FnOnce() -> Tree<Journey<Model, Command>>>>>;

struct Node<Model, Command> {
    step: Step<Model, Command>,
    tail: LazyTail<Model, Command>,
}

/// A sequence of steps whose remainder is only generated when it is read.
///
/// Cloning shares the underlying nodes.
pub struct Journey<Model, Command> {
    node: Option<Rc<Node<Model, Command>>>,
}

impl<Model, Command> Clone for Journey<Model, Command> {
    fn clone(&self) -> Self {
        Journey {
            node: self.node.clone(),
        }
    }
}

impl<Model, Command> Journey<Model, Command>
where
    Model: Clone + 'static,
    Command: Clone + 'static,
{
    /// The journey with no steps.
    pub fn end() -> Self {
        Journey { node: None }
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// The first step, if any. Does not force the rest.
    pub fn head(&self) -> Option<&Step<Model, Command>> {
        self.node.as_deref().map(|node| &node.step)
    }

    /// Everything after the first step, generating it if needed.
    pub fn tail(&self) -> Option<Journey<Model, Command>> {
        self.node
            .as_deref()
            .map(|node| node.tail.value.clone())
    }

    /// Steps in order, generated one at a time.
    pub fn steps(&self) -> Steps<Model, Command> {
        Steps {
            current: self.clone(),
        }
    }

    /// Commands in order, generated one at a time.
    pub fn commands(&self) -> impl Iterator<Item = Command> {
        self.steps().map(|step| step.command)
    }

    /// Generate every remaining step.
    pub fn to_vec(&self) -> Vec<Step<Model, Command>> {
        self.steps().collect()
    }

    /// Number of steps. Forces the whole journey.
    pub fn len(&self) -> usize {
        self.steps().count()
    }

    fn cons(step: Step<Model, Command>, tail: LazyTail<Model, Command>) -> Self {
        Journey {
            node: Some(Rc::new(Node { step, tail })),
        }
    }

    /// Tree for `step` followed by the journeys in `tail`: shrinking the
    /// tail keeps `step` in front.
    fn cons_tree(step: Step<Model, Command>, tail: LazyTail<Model, Command>) -> Tree<Self> {
        let value = Journey::cons(step.clone(), Rc::clone(&tail));
        Tree::from_forest(value, move || {
            let step = step.clone();
            let children = tail.children();
            Box::new(children.map(move |child| Journey::cons_tree(step.clone(), evaluated(child))))
        })
    }
}

fn lazy_tail<Model, Command, F>(generate: F) -> LazyTail<Model, Command>
where
    F: FnOnce() -> Tree<Journey<Model, Command>> + 'static,
{
    let generate: Box<dyn FnOnce() -> Tree<Journey<Model, Command>>> = Box::new(generate);
    Rc::new(LazyCell::new(generate))
}

fn evaluated<Model, Command>(tree: Tree<Journey<Model, Command>>) -> LazyTail<Model, Command>
where
    Model: 'static,
    Command: 'static,
{
    lazy_tail(move || tree)
}

/// Iterator over the steps of a [`Journey`].
pub struct Steps<Model, Command> {
    current: Journey<Model, Command>,
}

impl<Model, Command> Iterator for Steps<Model, Command>
where
    Model: Clone + 'static,
    Command: Clone + 'static,
{
    type Item = Step<Model, Command>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.current.head()?.clone();
        self.current = self.current.tail().unwrap_or_else(Journey::end);
        Some(step)
    }
}

impl<Model, Command> fmt::Debug for Journey<Model, Command>
where
    Model: Clone + 'static,
    Command: Clone + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.commands()).finish()
    }
}

impl<Model, Command> fmt::Display for Journey<Model, Command>
where
    Model: Clone + fmt::Debug + 'static,
    Command: Clone + fmt::Display + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in self.steps() {
            writeln!(f, "Step: {} Model: {:?}", step.command, step.model_before)?;
        }
        Ok(())
    }
}

/// Journeys whose every command is allowed by the model it follows.
///
/// Each level picks one of [`StateMachine::commands`] with equal weight,
/// moves the model forward and continues until
/// [`StateMachine::is_complete`]. Shrinking an earlier command regenerates
/// the rest from the new model with the same seed, so shrunk journeys stay
/// valid.
pub fn valid_journey<M>(machine: Rc<M>) -> Gen<Journey<M::Model, M::Command>>
where
    M: StateMachine + 'static,
{
    Gen::new(move |size, seed| {
        let model = machine.initial_model();
        journey_tree(Rc::clone(&machine), model, size, seed)
    })
}

fn journey_tree<M>(
    machine: Rc<M>,
    model: M::Model,
    size: Size,
    seed: Seed,
) -> Tree<Journey<M::Model, M::Command>>
where
    M: StateMachine + 'static,
{
    if machine.is_complete(&model) {
        return Tree::singleton(Journey::end());
    }
    let Ok(choice) = Gen::one_of(machine.commands(&model)) else {
        return Tree::singleton(Journey::end());
    };

    let (head_seed, tail_seed) = seed.split();
    choice.generate(size, head_seed).bind(move |command| {
        let next = machine.transition(&model, &command);
        let step = Step::new(model.clone(), command);
        let machine = Rc::clone(&machine);
        let tail = lazy_tail(move || journey_tree(machine, next, size, tail_seed));
        Journey::cons_tree(step, tail)
    })
}

/// Property replaying unconstrained command lists, skipping commands whose
/// precondition fails.
pub fn unconstrained_property<M>(
    machine: Rc<M>,
    config: &JourneyConfig,
) -> Result<Property<Vec<M::Command>>>
where
    M: StateMachine + 'static,
{
    let generator = unconstrained(machine.as_ref(), config)?;
    Ok(Property::new(generator, move |commands: &Vec<M::Command>| {
        outcome(machine.as_ref(), commands.iter().cloned(), Mode::Unconstrained)
    })
    .named("journey"))
}

/// Property replaying valid-by-construction journeys.
pub fn valid_property<M>(machine: Rc<M>) -> Property<Journey<M::Model, M::Command>>
where
    M: StateMachine + 'static,
{
    let generator = valid_journey(Rc::clone(&machine));
    Property::new(generator, move |journey: &Journey<M::Model, M::Command>| {
        outcome(machine.as_ref(), journey.commands(), Mode::ValidByConstruction)
    })
    .named("journey")
}

/// Replay as a test outcome. A failure reports the applied steps rather
/// than the raw input, with the error as its heading.
fn outcome<M, I>(machine: &M, commands: I, mode: Mode) -> TestResult
where
    M: StateMachine,
    I: IntoIterator<Item = M::Command>,
{
    match replay(machine, commands, mode) {
        Ok(_) => TestResult::pass(),
        Err(failure) => TestResult::fail(failure.report(), &failure.error.to_string()),
    }
}
