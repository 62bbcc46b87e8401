//! User account types
//!
//! [`User`] is a stored account. [`SignupForm`] carries the raw, unvalidated
//! fields collected at signup; the account directory turns one into the other.

use crate::types::StoreError;
use std::fmt;
use std::str::FromStr;

/// Account role, stored lowercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }
}

impl FromStr for Role {
    type Err = StoreError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            _ => Err(StoreError::invalid_role(s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account
///
/// The password is kept and persisted in plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Three distinct digits
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Unique key of the account directory
    pub email: String,
    pub password: String,
    /// Ten digits starting with `0`
    pub phone_number: String,
    pub address: String,
    pub role: Role,
}

/// Raw signup input, validated by the account directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub address: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::lower("buyer", Role::Buyer)]
    #[case::title("Seller", Role::Seller)]
    #[case::upper("BUYER", Role::Buyer)]
    #[case::padded("  seller ", Role::Seller)]
    fn test_role_parsing(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>(), Ok(expected));
    }

    #[rstest]
    #[case::admin("admin")]
    #[case::empty("")]
    #[case::plural("buyers")]
    fn test_role_parsing_rejects_unknown(#[case] input: &str) {
        assert_eq!(input.parse::<Role>(), Err(StoreError::invalid_role(input)));
    }

    #[test]
    fn test_role_display_is_normalized() {
        assert_eq!(Role::Buyer.to_string(), "buyer");
        assert_eq!(Role::Seller.to_string(), "seller");
    }
}
