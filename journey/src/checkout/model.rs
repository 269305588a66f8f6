//! The abstract model of a basket.

use super::command::Item;
use serde::Serialize;
use std::collections::BTreeMap;

/// What the basket should look like, reduced to what the tests care about.
///
/// Quantities are never stored as zero: a line reduced to nothing is
/// removed from `items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    /// Item id to accumulated quantity, iterated in id order.
    pub items: BTreeMap<String, u32>,
    pub has_address: bool,
    pub has_payment_details: bool,
    pub order_created: bool,
    /// Set by the first added item and never cleared.
    pub ever_had_item: bool,
}

impl Model {
    /// The empty basket: no items, every flag false.
    pub fn new() -> Self {
        Model::default()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn quantity(&self, id: &str) -> Option<u32> {
        self.items.get(id).copied()
    }

    pub fn add_item(&self, item: &Item) -> Model {
        let mut items = self.items.clone();
        *items.entry(item.id.clone()).or_insert(0) += item.quantity;
        Model {
            items,
            ever_had_item: true,
            ..self.clone()
        }
    }

    /// Subtract `amount` from `id`, removing the entry once nothing is left.
    pub fn reduce_item(&self, id: &str, amount: u32) -> Model {
        let mut items = self.items.clone();
        if let Some(quantity) = items.get_mut(id) {
            if *quantity > amount {
                *quantity -= amount;
            } else {
                items.remove(id);
            }
        }
        Model {
            items,
            ..self.clone()
        }
    }

    pub fn with_address(&self) -> Model {
        Model {
            has_address: true,
            ..self.clone()
        }
    }

    pub fn with_payment_details(&self) -> Model {
        Model {
            has_payment_details: true,
            ..self.clone()
        }
    }

    pub fn with_order(&self) -> Model {
        Model {
            order_created: true,
            ..self.clone()
        }
    }
}
