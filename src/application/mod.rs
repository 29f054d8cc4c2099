//! Application layer orchestrating the checkout flow.
//!
//! `CheckoutController` is the entry point: it reacts to page events, gates the
//! submit on validation, plays the simulated payment and hands the result to the
//! notifier. Flow state is published on a `tokio::sync::watch` channel so the
//! window-close guard can observe a running payment.

pub mod controller;
pub mod feedback;
pub mod flow;
pub mod simulator;
