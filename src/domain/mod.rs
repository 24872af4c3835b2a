//! Domain layer: the checkout wizard state machine and its value objects.

pub mod checkout;
pub mod coupon;
pub mod currency;
pub mod customer;
pub mod money;
pub mod order;
pub mod payment;
pub mod plan;
pub mod ports;
pub mod validation;
