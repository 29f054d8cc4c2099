//! Domain types of the checkout flow: form fields and their rules, the payment
//! context, the fabricated transaction, and the ports the flow talks through.

pub mod context;
pub mod form;
pub mod page;
pub mod ports;
pub mod transaction;
pub mod validation;
