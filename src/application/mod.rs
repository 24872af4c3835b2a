//! Application layer orchestrating the domain over the ports.
//!
//! `CheckoutEngine` terminates the wizard by dispatching payment to the
//! armed provider and writing exactly one hand-off record.
//! `LeadFormService` runs the countdown-gated lead-form stubs.

pub mod engine;
pub mod forms;
