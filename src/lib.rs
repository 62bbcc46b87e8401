//! Rust Storefront Library
//! # Overview
//!
//! This library provides a console storefront where sellers list products and
//! buyers fill a cart and check out, persisted in flat comma-separated files.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Product, User, StoreError)
//! - [`validation`] - Field rules for signup and card details
//! - [`io`] - Flat-file persistence:
//!   - [`io::record_format`] - One record per line encoding and decoding
//!   - [`io::file_store`] - Append, scan, load and delete-by-rewrite
//! - [`core`] - Business logic components:
//!   - [`core::catalog`] - Product catalog over the product file
//!   - [`core::directory`] - Account signup and login
//!   - [`core::cart`] - Buyer cart and checkout
//!   - [`core::payment`] - Simulated card payment
//! - [`config`] - Runtime configuration
//! - [`cli`] - CLI arguments parsing and the interactive console
//!
//! # Record Files
//!
//! Products, one per line:
//!
//! - `PhysicalProduct,<id>,<name>,<price>,<weight>,<dimensions>`
//! - `DigitalProduct,<id>,<name>,<price>,<file_size>,<format>`
//!
//! Users, exactly eight fields per line:
//!
//! - `<user_id>,<first_name>,<last_name>,<email>,<password>,<phone_number>,<address>,<role>`
//!
//! Lines that fail to decode are skipped on load; they never abort it.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod types;
pub mod validation;

pub use config::StoreConfig;
pub use core::{AccountDirectory, Cart, Catalog, PaymentProcessor, Receipt};
pub use io::{FileStore, Record};
pub use types::{Product, ProductDetails, Role, SignupForm, StoreError, User};
