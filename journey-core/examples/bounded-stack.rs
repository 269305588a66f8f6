//! A bounded stack tested against a model.
//!
//! The stack forgets an extra element when popped while full. Both journey
//! generators find the bug and shrink it to a handful of commands.
//!
//! Run with: cargo run --example bounded-stack

use journey_core::*;
use std::fmt;
use std::rc::Rc;

const CAPACITY: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Seal,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Push(value) => write!(f, "Push({value})"),
            Op::Pop => write!(f, "Pop"),
            Op::Seal => write!(f, "Seal"),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct StackModel {
    values: Vec<i32>,
    sealed: bool,
}

#[derive(Debug, Clone)]
struct Stack {
    values: Vec<i32>,
    sealed: bool,
}

struct BoundedStack;

impl StateMachine for BoundedStack {
    type Model = StackModel;
    type Sut = Stack;
    type Command = Op;
    type AdapterError = String;
    type Divergence = String;

    fn initial_model(&self) -> StackModel {
        StackModel::default()
    }

    fn initial_sut(&self) -> Stack {
        Stack {
            values: Vec::new(),
            sealed: false,
        }
    }

    fn precondition(&self, model: &StackModel, op: &Op) -> bool {
        match op {
            Op::Push(_) => model.values.len() < CAPACITY,
            Op::Pop => !model.values.is_empty(),
            Op::Seal => true,
        }
    }

    fn transition(&self, model: &StackModel, op: &Op) -> StackModel {
        let mut next = model.clone();
        match op {
            Op::Push(value) => next.values.push(*value),
            Op::Pop => {
                next.values.pop();
            }
            Op::Seal => next.sealed = true,
        }
        next
    }

    fn execute(&self, stack: &Stack, op: &Op) -> std::result::Result<Stack, String> {
        if stack.sealed {
            return Err(format!("{op} on a sealed stack"));
        }
        let mut next = stack.clone();
        match op {
            Op::Push(value) => next.values.push(*value),
            Op::Pop => {
                if next.values.len() == CAPACITY {
                    next.values.pop();
                }
                next.values.pop();
            }
            Op::Seal => next.sealed = true,
        }
        Ok(next)
    }

    fn invariant(&self, stack: &Stack, model: &StackModel) -> std::result::Result<(), String> {
        if stack.values != model.values {
            return Err(format!("stack {:?}, model {:?}", stack.values, model.values));
        }
        Ok(())
    }

    fn is_terminal(&self, stack: &Stack) -> bool {
        stack.sealed
    }

    fn is_complete(&self, model: &StackModel) -> bool {
        model.sealed
    }

    fn commands(&self, model: &StackModel) -> Vec<Gen<Op>> {
        let mut commands = Vec::new();
        if model.values.len() < CAPACITY {
            commands.push(push());
        }
        if !model.values.is_empty() {
            commands.push(Gen::constant(Op::Pop));
        }
        // Seal only once full.
        if model.values.len() == CAPACITY {
            commands.push(Gen::constant(Op::Seal));
        }
        commands
    }

    fn all_commands(&self) -> Vec<Gen<Op>> {
        vec![push(), Gen::constant(Op::Pop), Gen::constant(Op::Seal)]
    }
}

fn push() -> Gen<Op> {
    Gen::<i32>::int_range(0, 9).map(Op::Push)
}

fn main() -> Result<()> {
    let machine = Rc::new(BoundedStack);
    let config = Config::default().with_tests(200);

    println!("Valid journeys");
    println!("{}", valid_property(Rc::clone(&machine)).run(&config));

    println!("Unconstrained journeys");
    let journeys = JourneyConfig::default().with_length(1..=30);
    println!("{}", unconstrained_property(machine, &journeys)?.run(&config));

    Ok(())
}
