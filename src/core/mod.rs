//! Core business logic module
//!
//! This module contains the storefront components:
//! - `traits` - Payment collaborator abstractions
//! - `catalog` - File-backed product catalog
//! - `directory` - Account signup and login
//! - `cart` - Buyer cart and checkout
//! - `payment` - Payment requests and the simulated card gateway

pub mod cart;
pub mod catalog;
pub mod directory;
pub mod payment;
pub mod traits;

pub use cart::{Cart, CartLine, CartSummary, Receipt, MIN_CHECKOUT_ITEMS};
pub use catalog::Catalog;
pub use directory::AccountDirectory;
pub use payment::{PaymentRequest, SimulatedGateway, DEFAULT_PAYMENT_DELAY};
pub use traits::{CardReader, PaymentProcessor};
