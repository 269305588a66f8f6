//! Hand-written checkout journeys.

use journey::checkout::{Basket, Checkout, Command, Item, Model, Phase};
use journey::*;

fn item(id: &str, quantity: u32) -> Item {
    Item {
        id: id.to_string(),
        price_pence: 1_299,
        quantity,
    }
}

pub fn test_reduce_everything_then_address() {
    let machine = Checkout::new();
    let add = Command::AddItem(item("A", 3));
    let reduce = Command::ReduceItem {
        selector: 5,
        amount: 2,
    };

    let model = machine.transition(&Model::new(), &add);
    let model = machine.transition(&model, &reduce);
    assert!(model.items.is_empty());
    assert!(model.ever_had_item);

    let address = Command::AddAddress("X".to_string());
    assert!(machine.precondition(&model, &address));
    let model = machine.transition(&model, &address);
    assert!(model.has_address);
    assert!(!machine.precondition(&model, &Command::CreateOrder));

    let payment = Command::AddPaymentDetails("4929000000006".to_string());
    let model = machine.transition(&model, &payment);
    assert!(model.has_payment_details);
    assert!(!machine.precondition(&model, &Command::CreateOrder));

    let replayed = replay(
        &machine,
        vec![add, reduce, address, payment, Command::CreateOrder],
        Mode::Unconstrained,
    )
    .expect("the correct service follows the model");
    assert_eq!(replayed.skipped, 1);
    assert_eq!(replayed.model, model);
    assert_eq!(replayed.sut.phase(), Phase::WithPaymentDetails);
    assert_eq!(replayed.sut.items(), Some(&[][..]));
}

pub fn test_order_stops_the_journey() {
    let machine = Checkout::new();
    let commands = vec![
        Command::AddItem(item("A", 1)),
        Command::AddAddress("Acacia Avenue Flat Four".to_string()),
        Command::AddPaymentDetails("4111111111111111".to_string()),
        Command::CreateOrder,
        Command::AddItem(item("B", 1)),
    ];

    let replayed = replay(&machine, commands, Mode::Unconstrained)
        .expect("the correct service follows the model");

    assert!(replayed.terminated_early);
    assert_eq!(replayed.consumed, 4);
    assert_eq!(replayed.applied.len(), 4);
    assert!(matches!(replayed.sut, Basket::Order(_)));
    assert!(replayed.model.order_created);
    assert_eq!(replayed.model.quantity("B"), None);
    assert_eq!(replayed.model.quantity("A"), Some(1));
}
