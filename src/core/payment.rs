//! Simulated payment confirmation
//!
//! Checkout hands a [`PaymentRequest`] to a [`PaymentProcessor`]. The only
//! processor shipped is [`SimulatedGateway`], which collects card details
//! field by field through a [`CardReader`], validates each one as soon as it
//! is entered, and then blocks for a fixed delay before approving. There is
//! no retry: the first invalid field fails the payment.
//!
//! Card details are never stored. Only a masked card number reaches the log.

use crate::core::traits::{CardReader, PaymentProcessor};
use crate::types::StoreError;
use crate::validation::{validate_card_number, validate_cvv, validate_expiry_date};
use rust_decimal::Decimal;
use std::thread;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Default simulated processing delay
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(2000);

/// A request to charge the buyer
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Random v4 identifier of this payment attempt
    pub payment_id: Uuid,
    pub amount: Decimal,
    /// Label chosen by the buyer, e.g. "Credit Card"
    pub method: String,
}

impl PaymentRequest {
    pub fn new(amount: Decimal, method: impl Into<String>) -> Self {
        PaymentRequest {
            payment_id: Uuid::new_v4(),
            amount,
            method: method.into(),
        }
    }
}

/// Card number with all but the last four characters hidden
fn mask_card_number(card_number: &str) -> String {
    let start = card_number.len().saturating_sub(4);
    let visible = card_number.get(start..).unwrap_or_default();
    format!("**** **** **** {}", visible)
}

/// Prompt-and-sleep payment processor
#[derive(Debug)]
pub struct SimulatedGateway<C> {
    reader: C,
    delay: Duration,
}

impl<C: CardReader> SimulatedGateway<C> {
    pub fn new(reader: C, delay: Duration) -> Self {
        SimulatedGateway { reader, delay }
    }

    pub fn into_reader(self) -> C {
        self.reader
    }

    /// Read one field, validate it, and fail the payment on the first problem
    fn read_valid(
        &mut self,
        prompt: &str,
        validate: fn(&str) -> Result<(), StoreError>,
        amount: Decimal,
    ) -> Result<String, StoreError> {
        let value = self
            .reader
            .read_field(prompt)
            .ok_or(StoreError::PaymentDeclined { amount })?;
        validate(&value)?;
        Ok(value)
    }
}

impl<C: CardReader> PaymentProcessor for SimulatedGateway<C> {
    fn confirm(&mut self, request: &PaymentRequest) -> Result<(), StoreError> {
        let amount = request.amount;
        let card_number =
            self.read_valid("Enter card number (16 digits): ", validate_card_number, amount)?;
        self.read_valid("Enter expiry date (MM/YY): ", validate_expiry_date, amount)?;
        self.read_valid("Enter CVV (3 digits): ", validate_cvv, amount)?;

        self.reader
            .notice(&format!("Processing your payment of ${}...", amount));
        thread::sleep(self.delay);

        info!(
            payment_id = %request.payment_id,
            amount = %amount,
            method = %request.method,
            card = %mask_card_number(&card_number),
            "payment processed"
        );
        Ok(())
    }
}
