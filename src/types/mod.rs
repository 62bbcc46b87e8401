//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `product`: Catalog products and their variants
//! - `user`: Accounts, roles and signup input
//! - `error`: Error types for the storefront

pub mod error;
pub mod product;
pub mod user;

pub use error::StoreError;
pub use product::{Product, ProductDetails, ProductId};
pub use user::{Role, SignupForm, User};
