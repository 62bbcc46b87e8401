//! Input validation rules
//!
//! Each check returns `Ok(())` or the specific [`StoreError`] variant that
//! describes the rejected field. Patterns are compiled once on first use.

use crate::types::StoreError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Separator between fields of a stored record
pub const FIELD_DELIMITER: char = ',';

/// Symbols accepted (and one required) in a password
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

static USER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("Invalid regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$").expect("Invalid regex"));

/// The regex crate has no lookahead, so the character classes a password
/// must contain are checked separately in [`validate_password`].
static PASSWORD_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]+$").expect("Invalid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[0-9]{9}$").expect("Invalid regex"));

static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("Invalid regex"));

static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").expect("Invalid regex"));

static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("Invalid regex"));

/// User id: exactly three ASCII digits, no digit repeated
pub fn validate_user_id(user_id: &str) -> Result<(), StoreError> {
    if !USER_ID_RE.is_match(user_id) {
        return Err(StoreError::invalid_user_id(
            user_id,
            "must be exactly three digits",
        ));
    }

    let distinct: HashSet<char> = user_id.chars().collect();
    if distinct.len() != 3 {
        return Err(StoreError::invalid_user_id(
            user_id,
            "must contain three unique digits",
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), StoreError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(StoreError::invalid_email(email))
    }
}

/// Password complexity
///
/// At least 8 characters from `[A-Za-z0-9@$!%*?&]` with one lowercase letter,
/// one uppercase letter, one digit and one of `@$!%*?&`.
pub fn validate_password(password: &str) -> Result<(), StoreError> {
    let complex = password.chars().count() >= MIN_PASSWORD_LEN
        && PASSWORD_CHARSET_RE.is_match(password)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if complex {
        Ok(())
    } else {
        Err(StoreError::WeakPassword)
    }
}

/// Phone number: ten digits starting with `0`
pub fn validate_phone_number(phone_number: &str) -> Result<(), StoreError> {
    if PHONE_RE.is_match(phone_number) {
        Ok(())
    } else {
        Err(StoreError::invalid_phone_number(phone_number))
    }
}

pub fn validate_card_number(card_number: &str) -> Result<(), StoreError> {
    if CARD_NUMBER_RE.is_match(card_number) {
        Ok(())
    } else {
        Err(StoreError::InvalidCardNumber)
    }
}

/// Expiry date in `MM/YY` form with a month between 01 and 12
pub fn validate_expiry_date(expiry: &str) -> Result<(), StoreError> {
    if EXPIRY_RE.is_match(expiry) {
        Ok(())
    } else {
        Err(StoreError::InvalidExpiryDate)
    }
}

pub fn validate_cvv(cvv: &str) -> Result<(), StoreError> {
    if CVV_RE.is_match(cvv) {
        Ok(())
    } else {
        Err(StoreError::InvalidCvv)
    }
}

/// Reject text that would break the one-record-per-line file format
pub fn validate_field(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.contains(FIELD_DELIMITER) || value.contains(['\n', '\r']) {
        Err(StoreError::InvalidField { field })
    } else {
        Ok(())
    }
}
