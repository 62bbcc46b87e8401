//! Core traits for payment collaborators
//!
//! Checkout never talks to a terminal directly. It hands the payment to a
//! [`PaymentProcessor`], and the simulated gateway pulls card input through a
//! [`CardReader`], so both can be replaced by scripted implementations.

use crate::core::payment::PaymentRequest;
use crate::types::StoreError;

/// Trait for confirming a payment
///
/// Implementations either approve the request or return the reason it was
/// declined. A declined payment must leave no side effects behind.
pub trait PaymentProcessor {
    /// Confirm a single payment request
    fn confirm(&mut self, request: &PaymentRequest) -> Result<(), StoreError>;
}

/// Trait for collecting one card field at a time
pub trait CardReader {
    /// Show the prompt and return the trimmed answer, or `None` once input ends
    fn read_field(&mut self, prompt: &str) -> Option<String>;

    /// Show a progress message to the payer
    fn notice(&mut self, _message: &str) {}
}

impl<C: CardReader + ?Sized> CardReader for &mut C {
    fn read_field(&mut self, prompt: &str) -> Option<String> {
        (**self).read_field(prompt)
    }

    fn notice(&mut self, message: &str) {
        (**self).notice(message)
    }
}
