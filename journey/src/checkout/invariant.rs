//! The invariant tying a basket to its model.

use super::basket::{Basket, Phase};
use super::model::Model;
use std::collections::BTreeMap;
use thiserror::Error;

/// One way a basket can disagree with the model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    #[error("basket is empty but the model holds {items:?}")]
    EmptyBasketWithItems { items: BTreeMap<String, u32> },

    #[error("basket is empty but the model has {flag} set")]
    EmptyBasketWithFlag { flag: &'static str },

    #[error("basket holds {basket:?} but the model holds {model:?}")]
    ItemsMismatch {
        basket: BTreeMap<String, u32>,
        model: BTreeMap<String, u32>,
    },

    #[error("basket has an address: {basket}, model has_address: {model}")]
    AddressMismatch { basket: bool, model: bool },

    #[error("basket has payment details: {basket}, model has_payment_details: {model}")]
    PaymentDetailsMismatch { basket: bool, model: bool },

    #[error("basket is an order: {basket}, model order_created: {model}")]
    OrderMismatch { basket: bool, model: bool },
}

/// Check that `basket` agrees with `model`.
pub fn check(basket: &Basket, model: &Model) -> Result<(), Divergence> {
    if let Basket::Empty = basket {
        if !model.items.is_empty() {
            return Err(Divergence::EmptyBasketWithItems {
                items: model.items.clone(),
            });
        }
        let flags = [
            ("has_address", model.has_address),
            ("has_payment_details", model.has_payment_details),
            ("order_created", model.order_created),
            ("ever_had_item", model.ever_had_item),
        ];
        if let Some((flag, _)) = flags.into_iter().find(|(_, set)| *set) {
            return Err(Divergence::EmptyBasketWithFlag { flag });
        }
    }

    if let Some(lines) = basket.items() {
        let mut tally = BTreeMap::new();
        for line in lines {
            *tally.entry(line.id.clone()).or_insert(0) += line.quantity;
        }
        if tally != model.items {
            return Err(Divergence::ItemsMismatch {
                basket: tally,
                model: model.items.clone(),
            });
        }
    }

    let phase = basket.phase();
    let has_address = phase >= Phase::WithAddress;
    if has_address != model.has_address {
        return Err(Divergence::AddressMismatch {
            basket: has_address,
            model: model.has_address,
        });
    }

    let has_payment_details = phase >= Phase::WithPaymentDetails;
    if has_payment_details != model.has_payment_details {
        return Err(Divergence::PaymentDetailsMismatch {
            basket: has_payment_details,
            model: model.has_payment_details,
        });
    }

    let is_order = phase == Phase::Order;
    if is_order != model.order_created {
        return Err(Divergence::OrderMismatch {
            basket: is_order,
            model: model.order_created,
        });
    }

    Ok(())
}
