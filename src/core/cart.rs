//! Shopping cart and checkout
//!
//! This module provides the `Cart` struct which holds the products a buyer
//! selected during one login session.
//!
//! The Cart is responsible for:
//! - Resolving product ids against a freshly loaded catalog
//! - Bounds-checked removal by position
//! - Enforcing the minimum item count at checkout
//! - Clearing itself only after the payment was confirmed

use crate::core::catalog::Catalog;
use crate::core::payment::PaymentRequest;
use crate::core::traits::PaymentProcessor;
use crate::types::{Product, StoreError};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

/// Fewest items a cart must hold before it can be checked out
pub const MIN_CHECKOUT_ITEMS: usize = 3;

/// One line of a cart listing
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// 1-based position as shown to the buyer
    pub position: usize,
    pub name: String,
    pub price: Decimal,
}

/// Snapshot of the cart contents
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Outcome of a successful checkout
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub payment_id: Uuid,
    pub item_count: usize,
    pub total: Decimal,
    pub method: String,
}

/// Products selected by one buyer, in the order they were added
#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the prices of every item
    pub fn total(&self) -> Decimal {
        self.items.iter().map(Product::price).sum()
    }

    /// Add the product with this id to the cart
    ///
    /// The id is resolved against the catalog file as it is now, so products
    /// added by a seller earlier in the same process are found.
    ///
    /// # Errors
    ///
    /// Returns `ProductNotFound` if no stored product has this id.
    pub fn add(&mut self, catalog: &Catalog, product_id: &str) -> Result<&Product, StoreError> {
        let product = catalog.find(product_id)?;
        self.items.push(product);
        Ok(&self.items[self.items.len() - 1])
    }

    /// List the items with their positions and the running total
    pub fn view(&self) -> CartSummary {
        let lines = self
            .items
            .iter()
            .enumerate()
            .map(|(i, product)| CartLine {
                position: i + 1,
                name: product.name().to_string(),
                price: product.price(),
            })
            .collect();

        CartSummary {
            lines,
            total: self.total(),
        }
    }

    /// Remove the item at a 0-based index
    ///
    /// # Errors
    ///
    /// Returns `CartIndexOutOfRange` if the index is past the last item. The
    /// cart is left unchanged in that case.
    pub fn remove(&mut self, index: usize) -> Result<Product, StoreError> {
        if index >= self.items.len() {
            return Err(StoreError::CartIndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Pay for every item in the cart
    ///
    /// # Arguments
    ///
    /// * `processor` - Confirms or declines the payment
    /// * `method` - Payment method label chosen by the buyer
    ///
    /// # Returns
    ///
    /// A `Receipt` for the confirmed payment. The cart is empty afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cart holds fewer than [`MIN_CHECKOUT_ITEMS`] items (`CartBelowMinimum`)
    /// - The processor declines the payment (its error is returned as is)
    ///
    /// The cart is untouched on every error.
    pub fn checkout<P: PaymentProcessor>(
        &mut self,
        processor: &mut P,
        method: &str,
    ) -> Result<Receipt, StoreError> {
        if self.items.len() < MIN_CHECKOUT_ITEMS {
            return Err(StoreError::CartBelowMinimum {
                required: MIN_CHECKOUT_ITEMS,
                found: self.items.len(),
            });
        }

        let request = PaymentRequest::new(self.total(), method);
        processor.confirm(&request)?;

        let receipt = Receipt {
            payment_id: request.payment_id,
            item_count: self.items.len(),
            total: request.amount,
            method: request.method,
        };
        self.items.clear();

        info!(
            payment_id = %receipt.payment_id,
            items = receipt.item_count,
            total = %receipt.total,
            "checkout completed"
        );
        Ok(receipt)
    }
}
