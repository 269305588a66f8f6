//! A checkout basket tested against its model.
//!
//! The basket moves through `Empty`, `WithItems`, `WithAddress`,
//! `WithPaymentDetails` and `Order`. [`Checkout`] wires the
//! [`BasketService`] into the journey harness so that generated journeys can
//! be replayed against it and checked with [`invariant::check`] after every
//! step.
//!
//! ```no_run
//! use journey::checkout::{Checkout, Defects};
//! use journey::{valid_property, Config, TestResult};
//! use std::rc::Rc;
//!
//! let machine = Rc::new(Checkout::with_defects(Defects::none().address_resets_payment()));
//! match valid_property(machine).run(&Config::default()) {
//!     TestResult::Fail { .. } => {}
//!     other => panic!("the defect went unnoticed: {other}"),
//! }
//! ```

pub mod basket;
pub mod command;
pub mod generators;
pub mod invariant;
pub mod model;

pub use basket::{Basket, BasketError, BasketService, Defects, Phase};
pub use command::{resolve_reduction, Command, Item};
pub use invariant::{check, Divergence};
pub use model::Model;

use journey_core::{Gen, StateMachine};

/// The checkout state machine: [`Model`] against a [`BasketService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkout {
    service: BasketService,
}

impl Checkout {
    /// Checkout backed by the correct service.
    pub fn new() -> Self {
        Checkout::default()
    }

    pub fn with_defects(defects: Defects) -> Self {
        Checkout {
            service: BasketService::with_defects(defects),
        }
    }
}

impl StateMachine for Checkout {
    type Model = Model;
    type Sut = Basket;
    type Command = Command;
    type AdapterError = BasketError;
    type Divergence = Divergence;

    fn initial_model(&self) -> Model {
        Model::new()
    }

    fn initial_sut(&self) -> Basket {
        Basket::Empty
    }

    fn precondition(&self, model: &Model, command: &Command) -> bool {
        command.precondition(model)
    }

    fn transition(&self, model: &Model, command: &Command) -> Model {
        command.transition(model)
    }

    fn execute(&self, basket: &Basket, command: &Command) -> Result<Basket, BasketError> {
        match command {
            Command::AddItem(item) => self.service.add_item(basket, item),
            Command::ReduceItem { selector, amount } => {
                let lines = basket.items().ok_or(BasketError::WrongPhase {
                    operation: "reduce_item_count",
                    phase: basket.phase(),
                })?;
                let lines = lines.iter().map(|line| (line.id.as_str(), line.quantity));
                let (id, amount) = resolve_reduction(lines, *selector, *amount).ok_or(
                    BasketError::NothingToReduce {
                        operation: "reduce_item_count",
                    },
                )?;
                self.service.reduce_item_count(basket, id, amount)
            }
            Command::AddAddress(address) => self.service.add_address(basket, address),
            Command::AddPaymentDetails(details) => {
                self.service.add_payment_details(basket, details)
            }
            Command::CreateOrder => self.service.make_order(basket),
        }
    }

    fn invariant(&self, basket: &Basket, model: &Model) -> Result<(), Divergence> {
        check(basket, model)
    }

    fn is_terminal(&self, basket: &Basket) -> bool {
        matches!(basket, Basket::Order(_))
    }

    fn is_complete(&self, model: &Model) -> bool {
        model.order_created
    }

    fn commands(&self, model: &Model) -> Vec<Gen<Command>> {
        generators::allowed(model)
    }

    fn all_commands(&self) -> Vec<Gen<Command>> {
        generators::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey_core::{replay, Mode};

    fn item(id: &str, quantity: u32) -> Item {
        Item {
            id: id.to_string(),
            price_pence: 1_500,
            quantity,
        }
    }

    #[test]
    fn test_reduce_resolves_against_basket_lines() {
        let checkout = Checkout::new();
        let basket = checkout
            .execute(&Basket::Empty, &Command::AddItem(item("B", 2)))
            .unwrap();
        let basket = checkout.execute(&basket, &Command::AddItem(item("A", 4))).unwrap();
        let basket = checkout
            .execute(&basket, &Command::ReduceItem { selector: 0, amount: 1 })
            .unwrap();
        assert_eq!(basket.items().unwrap(), &[item("B", 2), item("A", 2)]);
    }

    #[test]
    fn test_reduce_on_empty_basket() {
        let result = replay(
            &Checkout::new(),
            vec![Command::ReduceItem { selector: 0, amount: 0 }],
            Mode::Unconstrained,
        )
        .unwrap();
        assert_eq!(result.skipped, 1);

        let error = Checkout::new()
            .execute(&Basket::Empty, &Command::ReduceItem { selector: 0, amount: 0 })
            .unwrap_err();
        assert_eq!(
            error,
            BasketError::WrongPhase {
                operation: "reduce_item_count",
                phase: Phase::Empty
            }
        );
    }

    #[test]
    fn test_order_is_terminal() {
        let checkout = Checkout::new();
        let replayed = replay(
            &checkout,
            vec![
                Command::AddItem(item("A", 1)),
                Command::AddAddress("Acacia Avenue".to_string()),
                Command::AddPaymentDetails("4111111111111111".to_string()),
                Command::CreateOrder,
            ],
            Mode::ValidByConstruction,
        )
        .unwrap();
        assert!(checkout.is_terminal(&replayed.sut));
        assert!(checkout.is_complete(&replayed.model));
    }
}
