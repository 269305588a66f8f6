//! Generators for checkout commands and their parameters.

use super::command::{Command, Item};
use super::model::Model;
use journey_core::{Gen, Range};

/// Items with an 8 character alphanumeric id, a price of 50p to £230 and a
/// quantity of 1 to 6.
pub fn item() -> Gen<Item> {
    let id = Gen::<String>::string_of(Gen::<char>::ascii_alphanumeric(), Range::singleton(8));
    let price = Gen::<u32>::from_range(Range::new(50, 23_000));
    let quantity = Gen::<u32>::from_range(Range::new(1, 6));

    Gen::<(String, u32)>::tuple_of(id, price).bind(move |(id, price_pence)| {
        quantity.clone().map(move |quantity| Item {
            id: id.clone(),
            price_pence,
            quantity,
        })
    })
}

pub fn add_item() -> Gen<Command> {
    item().map(Command::AddItem)
}

pub fn reduce_item() -> Gen<Command> {
    let parameter = || Gen::<u32>::from_range(Range::new(0, 200));
    Gen::<(u32, u32)>::tuple_of(parameter(), parameter())
        .map(|(selector, amount)| Command::ReduceItem { selector, amount })
}

pub fn add_address() -> Gen<Command> {
    Gen::<String>::string_of(Gen::<char>::ascii_alpha(), Range::new(20, 25))
        .map(Command::AddAddress)
}

pub fn add_payment_details() -> Gen<Command> {
    Gen::<String>::string_of(Gen::<char>::digit(), Range::singleton(16))
        .map(Command::AddPaymentDetails)
}

pub fn create_order() -> Gen<Command> {
    Gen::constant(Command::CreateOrder)
}

/// One generator per command, in declaration order.
pub fn all() -> Vec<Gen<Command>> {
    vec![
        add_item(),
        reduce_item(),
        add_address(),
        add_payment_details(),
        create_order(),
    ]
}

/// Generators for exactly the commands `model` allows.
///
/// Nothing is allowed once the order exists.
pub fn allowed(model: &Model) -> Vec<Gen<Command>> {
    if model.order_created {
        return Vec::new();
    }

    match (model.has_payment_details, model.has_address, model.has_items()) {
        (true, _, true) => all(),
        (true, _, false) => vec![add_item(), add_address(), add_payment_details()],
        (false, true, true) => vec![
            add_item(),
            reduce_item(),
            add_address(),
            add_payment_details(),
        ],
        (false, true, false) => vec![add_item(), add_address(), add_payment_details()],
        (false, false, true) => vec![add_item(), reduce_item(), add_address()],
        (false, false, false) => vec![add_item()],
    }
}
