//! Error types for the storefront
//!
//! Every failure the library can report is a variant of [`StoreError`].
//! Callers match on the variant instead of parsing messages.
//!
//! # Error Categories
//!
//! - **Validation Errors**: malformed signup fields, invalid product fields,
//!   duplicate ids or emails, invalid card details
//! - **Lookup Errors**: unknown product id, unknown account
//! - **Record Errors**: a stored line that cannot be decoded (skipped, never fatal)
//! - **Cart Errors**: checkout below the minimum, bad cart position, declined payment
//! - **I/O Errors**: unreadable or unwritable backing file

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the storefront
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// User id is not three distinct digits
    #[error("Invalid user ID '{user_id}': {reason}")]
    InvalidUserId {
        /// The rejected user id
        user_id: String,
        /// Which rule was broken
        reason: &'static str,
    },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    /// Signup with an email the directory already holds
    #[error("Email '{email}' already exists. Please log in or use a different email")]
    DuplicateEmail { email: String },

    #[error("Invalid password. Password must be at least 8 characters, include uppercase, lowercase, digit, and special character (@$!%*?&)")]
    WeakPassword,

    #[error("Invalid phone number '{phone_number}': must start with '0' and be exactly 10 digits long")]
    InvalidPhoneNumber { phone_number: String },

    #[error("Invalid role '{role}'. Please enter 'buyer' or 'seller' only")]
    InvalidRole { role: String },

    #[error("Product ID cannot be empty")]
    EmptyProductId,

    #[error("Product name cannot be empty")]
    EmptyProductName,

    #[error("Product price must be greater than zero, got {price}")]
    NonPositivePrice { price: Decimal },

    /// Price above the ceiling that keeps cart totals from overflowing
    #[error("Product price cannot exceed {max}, got {price}")]
    PriceTooHigh { price: Decimal, max: Decimal },

    /// A text field holds the field delimiter or a line break
    ///
    /// Either would split the record when it is written as a single line.
    #[error("Field '{field}' cannot contain commas or line breaks")]
    InvalidField { field: &'static str },

    #[error("Product with ID '{product_id}' already exists")]
    DuplicateProduct { product_id: String },

    #[error("Product '{product_id}' not found")]
    ProductNotFound { product_id: String },

    #[error("No account found with email '{email}'. Please sign up or try again")]
    AccountNotFound { email: String },

    #[error("Email or password cannot be empty")]
    EmptyCredentials,

    #[error("Incorrect password")]
    IncorrectPassword,

    /// Stored line has too few fields for its record type
    #[error("Incomplete data for {record_type} (expected {expected} fields, found {found})")]
    IncompleteRecord {
        record_type: String,
        expected: usize,
        found: usize,
    },

    #[error("Unknown product type '{tag}'")]
    UnknownProductType { tag: String },

    /// Numeric field in a stored line or in user input failed to parse
    #[error("Invalid number '{value}' for field '{field}'")]
    InvalidNumber { field: &'static str, value: String },

    /// User line that is not exactly 8 fields or carries an unknown role
    #[error("Malformed user record: {message}")]
    MalformedUserRecord { message: String },

    /// Stored line whose bytes are not valid UTF-8
    #[error("Stored line is not valid UTF-8: {message}")]
    InvalidUtf8 { message: String },

    /// Stored line the CSV reader rejected for any other reason
    #[error("Undecodable stored line: {message}")]
    UndecodableRecord { message: String },

    #[error("Invalid card number. Please enter a 16-digit card number")]
    InvalidCardNumber,

    #[error("Invalid expiry date. Please enter in MM/YY format")]
    InvalidExpiryDate,

    #[error("Invalid CVV. Please enter a 3-digit CVV")]
    InvalidCvv,

    #[error("You need at least {required} items in your cart to checkout, found {found}")]
    CartBelowMinimum { required: usize, found: usize },

    #[error("No cart item at index {index}: cart holds {len} items")]
    CartIndexOutOfRange { index: usize, len: usize },

    #[error("Payment of {amount} failed or was cancelled")]
    PaymentDeclined { amount: Decimal },

    /// I/O error occurred while reading or writing a backing file
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to StoreError
impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        StoreError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to StoreError
impl From<csv::Error> for StoreError {
    fn from(error: csv::Error) -> Self {
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(io) => io.into(),
            csv::ErrorKind::Utf8 { .. } => StoreError::InvalidUtf8 { message },
            _ => StoreError::UndecodableRecord { message },
        }
    }
}

// Helper functions for creating common errors

impl StoreError {
    /// Create an InvalidUserId error
    pub fn invalid_user_id(user_id: &str, reason: &'static str) -> Self {
        StoreError::InvalidUserId {
            user_id: user_id.to_string(),
            reason,
        }
    }

    /// Create an InvalidEmail error
    pub fn invalid_email(email: &str) -> Self {
        StoreError::InvalidEmail {
            email: email.to_string(),
        }
    }

    /// Create a DuplicateEmail error
    pub fn duplicate_email(email: &str) -> Self {
        StoreError::DuplicateEmail {
            email: email.to_string(),
        }
    }

    /// Create an InvalidPhoneNumber error
    pub fn invalid_phone_number(phone_number: &str) -> Self {
        StoreError::InvalidPhoneNumber {
            phone_number: phone_number.to_string(),
        }
    }

    /// Create an InvalidRole error
    pub fn invalid_role(role: &str) -> Self {
        StoreError::InvalidRole {
            role: role.to_string(),
        }
    }

    /// Create a DuplicateProduct error
    pub fn duplicate_product(product_id: &str) -> Self {
        StoreError::DuplicateProduct {
            product_id: product_id.to_string(),
        }
    }

    /// Create a ProductNotFound error
    pub fn product_not_found(product_id: &str) -> Self {
        StoreError::ProductNotFound {
            product_id: product_id.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(email: &str) -> Self {
        StoreError::AccountNotFound {
            email: email.to_string(),
        }
    }

    /// Create an IncompleteRecord error
    pub fn incomplete_record(record_type: &str, expected: usize, found: usize) -> Self {
        StoreError::IncompleteRecord {
            record_type: record_type.to_string(),
            expected,
            found,
        }
    }

    /// Create an UnknownProductType error
    pub fn unknown_product_type(tag: &str) -> Self {
        StoreError::UnknownProductType {
            tag: tag.to_string(),
        }
    }

    /// Create an InvalidNumber error
    pub fn invalid_number(field: &'static str, value: &str) -> Self {
        StoreError::InvalidNumber {
            field,
            value: value.to_string(),
        }
    }

    /// Create a MalformedUserRecord error
    pub fn malformed_user_record(message: impl Into<String>) -> Self {
        StoreError::MalformedUserRecord {
            message: message.into(),
        }
    }

    /// Whether this error is a validation failure caused by caller input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidUserId { .. }
                | StoreError::InvalidEmail { .. }
                | StoreError::DuplicateEmail { .. }
                | StoreError::WeakPassword
                | StoreError::InvalidPhoneNumber { .. }
                | StoreError::InvalidRole { .. }
                | StoreError::EmptyProductId
                | StoreError::EmptyProductName
                | StoreError::NonPositivePrice { .. }
                | StoreError::PriceTooHigh { .. }
                | StoreError::InvalidField { .. }
                | StoreError::DuplicateProduct { .. }
                | StoreError::InvalidCardNumber
                | StoreError::InvalidExpiryDate
                | StoreError::InvalidCvv
        )
    }
}
