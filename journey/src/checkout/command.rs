//! Commands a shopper can issue, with their preconditions and model
//! transitions.

use super::model::Model;
use serde::Serialize;
use std::fmt;

/// A line item: `quantity` units of `id` at `price_pence` each.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Item {
    pub id: String,
    pub price_pence: u32,
    pub quantity: u32,
}

/// The closed set of checkout operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Command {
    AddItem(Item),
    /// Resolved against the current lines at execution time, see
    /// [`resolve_reduction`].
    ReduceItem { selector: u32, amount: u32 },
    AddAddress(String),
    AddPaymentDetails(String),
    CreateOrder,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddItem(_) => "AddItem",
            Command::ReduceItem { .. } => "ReduceItem",
            Command::AddAddress(_) => "AddAddress",
            Command::AddPaymentDetails(_) => "AddPaymentDetails",
            Command::CreateOrder => "CreateOrder",
        }
    }

    /// Whether the command is allowed in `model`.
    pub fn precondition(&self, model: &Model) -> bool {
        match self {
            Command::AddItem(_) => true,
            Command::ReduceItem { .. } => model.has_items(),
            Command::AddAddress(_) => model.ever_had_item,
            Command::AddPaymentDetails(_) => model.has_address,
            Command::CreateOrder => model.has_payment_details && model.has_items(),
        }
    }

    /// The model after this command. Total: a command that does not apply
    /// leaves quantities untouched.
    pub fn transition(&self, model: &Model) -> Model {
        match self {
            Command::AddItem(item) => model.add_item(item),
            Command::ReduceItem { selector, amount } => {
                let lines = model.items.iter().map(|(id, quantity)| (id.as_str(), *quantity));
                match resolve_reduction(lines, *selector, *amount) {
                    Some((id, amount)) => model.reduce_item(id, amount),
                    None => model.clone(),
                }
            }
            Command::AddAddress(_) => model.with_address(),
            Command::AddPaymentDetails(_) => model.with_payment_details(),
            Command::CreateOrder => model.with_order(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddItem(item) => write!(
                f,
                "AddItem({} x{} @ {}p)",
                item.id, item.quantity, item.price_pence
            ),
            Command::ReduceItem { selector, amount } => {
                write!(f, "ReduceItem(selector {selector}, amount {amount})")
            }
            Command::AddAddress(address) => write!(f, "AddAddress({address:?})"),
            Command::AddPaymentDetails(details) => write!(f, "AddPaymentDetails({details:?})"),
            Command::CreateOrder => write!(f, "CreateOrder"),
        }
    }
}

/// Pick the line and amount a `ReduceItem` refers to.
///
/// Lines with a quantity are taken in ascending id order; `selector` picks
/// one modulo their count and the amount is `amount % quantity + 1`, so it
/// always lies in `1..=quantity`. `None` when there is no such line.
pub fn resolve_reduction<'a, I>(lines: I, selector: u32, amount: u32) -> Option<(&'a str, u32)>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let mut lines: Vec<(&str, u32)> = lines
        .into_iter()
        .filter(|(_, quantity)| *quantity > 0)
        .collect();
    if lines.is_empty() {
        return None;
    }
    lines.sort_by(|a, b| a.0.cmp(b.0));

    let (id, quantity) = lines[selector as usize % lines.len()];
    Some((id, amount % quantity + 1))
}
