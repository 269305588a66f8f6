//! The basket under test and the service that moves it between phases.

use super::command::Item;
use std::fmt;
use thiserror::Error;

/// A basket holding at least the phase's lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithItems {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithAddress {
    pub basket: WithItems,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithPaymentDetails {
    pub basket: WithAddress,
    pub payment_details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub basket: WithPaymentDetails,
}

/// A basket in exactly one phase. Each phase refines the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Basket {
    Empty,
    WithItems(WithItems),
    WithAddress(WithAddress),
    WithPaymentDetails(WithPaymentDetails),
    Order(Order),
}

/// The phase of a [`Basket`], ordered from `Empty` to `Order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Empty,
    WithItems,
    WithAddress,
    WithPaymentDetails,
    Order,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Empty => "Empty",
            Phase::WithItems => "WithItems",
            Phase::WithAddress => "WithAddress",
            Phase::WithPaymentDetails => "WithPaymentDetails",
            Phase::Order => "Order",
        };
        f.write_str(name)
    }
}

impl Basket {
    pub fn phase(&self) -> Phase {
        match self {
            Basket::Empty => Phase::Empty,
            Basket::WithItems(_) => Phase::WithItems,
            Basket::WithAddress(_) => Phase::WithAddress,
            Basket::WithPaymentDetails(_) => Phase::WithPaymentDetails,
            Basket::Order(_) => Phase::Order,
        }
    }

    /// The lines, for every phase past `Empty`.
    pub fn items(&self) -> Option<&[Item]> {
        match self {
            Basket::Empty => None,
            Basket::WithItems(basket) => Some(&basket.items),
            Basket::WithAddress(basket) => Some(&basket.basket.items),
            Basket::WithPaymentDetails(basket) => Some(&basket.basket.basket.items),
            Basket::Order(order) => Some(&order.basket.basket.basket.items),
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Basket::Empty | Basket::WithItems(_) => None,
            Basket::WithAddress(basket) => Some(&basket.address),
            Basket::WithPaymentDetails(basket) => Some(&basket.basket.address),
            Basket::Order(order) => Some(&order.basket.basket.address),
        }
    }

    pub fn payment_details(&self) -> Option<&str> {
        match self {
            Basket::Empty | Basket::WithItems(_) | Basket::WithAddress(_) => None,
            Basket::WithPaymentDetails(basket) => Some(&basket.payment_details),
            Basket::Order(order) => Some(&order.basket.payment_details),
        }
    }

    /// Mutable lines of a basket that still accepts item changes.
    fn open_items_mut(&mut self) -> Option<&mut Vec<Item>> {
        match self {
            Basket::Empty | Basket::Order(_) => None,
            Basket::WithItems(basket) => Some(&mut basket.items),
            Basket::WithAddress(basket) => Some(&mut basket.basket.items),
            Basket::WithPaymentDetails(basket) => Some(&mut basket.basket.basket.items),
        }
    }
}

/// The adapter was asked to do something its phase does not support.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BasketError {
    #[error("{operation} is not supported on a basket in phase {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: Phase,
    },

    #[error("{operation} found no line to reduce")]
    NothingToReduce { operation: &'static str },
}

/// Bugs the service can be built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Defects {
    /// Reducing a line to zero leaves the empty line in the basket.
    pub keep_empty_lines: bool,
    /// Adding an address to a basket with payment details drops them.
    pub address_resets_payment: bool,
}

impl Defects {
    pub fn none() -> Self {
        Defects::default()
    }

    pub fn keep_empty_lines(mut self) -> Self {
        self.keep_empty_lines = true;
        self
    }

    pub fn address_resets_payment(mut self) -> Self {
        self.address_resets_payment = true;
        self
    }
}

/// The checkout service. Every operation takes the current basket and
/// returns the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasketService {
    defects: Defects,
}

impl BasketService {
    /// A service without defects.
    pub fn new() -> Self {
        BasketService::default()
    }

    pub fn with_defects(defects: Defects) -> Self {
        BasketService { defects }
    }

    /// Add `item`, merging it into an existing line with the same id.
    pub fn add_item(&self, basket: &Basket, item: &Item) -> Result<Basket, BasketError> {
        if let Basket::Empty = basket {
            return Ok(Basket::WithItems(WithItems {
                items: vec![item.clone()],
            }));
        }

        let mut next = basket.clone();
        let items = next.open_items_mut().ok_or(BasketError::WrongPhase {
            operation: "add_item",
            phase: basket.phase(),
        })?;
        match items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity += item.quantity,
            None => items.push(item.clone()),
        }
        Ok(next)
    }

    /// Take `amount` units off the line for `id`, dropping the line once it
    /// is empty. An unknown id leaves the basket as it is.
    pub fn reduce_item_count(
        &self,
        basket: &Basket,
        id: &str,
        amount: u32,
    ) -> Result<Basket, BasketError> {
        let mut next = basket.clone();
        let items = match next.open_items_mut() {
            Some(items) => items,
            None => {
                return Err(BasketError::WrongPhase {
                    operation: "reduce_item_count",
                    phase: basket.phase(),
                })
            }
        };

        if let Some(index) = items.iter().position(|line| line.id == id) {
            let remaining = items[index].quantity.saturating_sub(amount);
            if remaining > 0 || self.defects.keep_empty_lines {
                if remaining == 0 {
                    tracing::trace!(id, "keeping an empty line");
                }
                items[index].quantity = remaining;
            } else {
                items.remove(index);
            }
        }
        Ok(next)
    }

    pub fn add_address(&self, basket: &Basket, address: &str) -> Result<Basket, BasketError> {
        let address = address.to_string();
        match basket {
            Basket::WithItems(items) => Ok(Basket::WithAddress(WithAddress {
                basket: items.clone(),
                address,
            })),
            Basket::WithAddress(current) => Ok(Basket::WithAddress(WithAddress {
                address,
                ..current.clone()
            })),
            Basket::WithPaymentDetails(current) if self.defects.address_resets_payment => {
                tracing::trace!("address replaced, dropping payment details");
                Ok(Basket::WithAddress(WithAddress {
                    basket: current.basket.basket.clone(),
                    address,
                }))
            }
            Basket::WithPaymentDetails(current) => {
                Ok(Basket::WithPaymentDetails(WithPaymentDetails {
                    basket: WithAddress {
                        basket: current.basket.basket.clone(),
                        address,
                    },
                    payment_details: current.payment_details.clone(),
                }))
            }
            Basket::Empty | Basket::Order(_) => Err(BasketError::WrongPhase {
                operation: "add_address",
                phase: basket.phase(),
            }),
        }
    }

    pub fn add_payment_details(
        &self,
        basket: &Basket,
        payment_details: &str,
    ) -> Result<Basket, BasketError> {
        let payment_details = payment_details.to_string();
        match basket {
            Basket::WithAddress(current) => Ok(Basket::WithPaymentDetails(WithPaymentDetails {
                basket: current.clone(),
                payment_details,
            })),
            Basket::WithPaymentDetails(current) => {
                Ok(Basket::WithPaymentDetails(WithPaymentDetails {
                    basket: current.basket.clone(),
                    payment_details,
                }))
            }
            Basket::Empty | Basket::WithItems(_) | Basket::Order(_) => {
                Err(BasketError::WrongPhase {
                    operation: "add_payment_details",
                    phase: basket.phase(),
                })
            }
        }
    }

    pub fn make_order(&self, basket: &Basket) -> Result<Basket, BasketError> {
        match basket {
            Basket::WithPaymentDetails(current) => Ok(Basket::Order(Order {
                basket: current.clone(),
            })),
            Basket::Empty | Basket::WithItems(_) | Basket::WithAddress(_) | Basket::Order(_) => {
                Err(BasketError::WrongPhase {
                    operation: "make_order",
                    phase: basket.phase(),
                })
            }
        }
    }
}
