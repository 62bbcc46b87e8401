//! Line format for stored products and users
//!
//! This module centralizes all record format concerns, providing:
//! - The [`Record`] trait shared by every record kind the file store handles
//! - Product encoding/decoding with a leading type tag
//! - User encoding/decoding as a fixed 8-field line
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Formats
//!
//! ```text
//! PhysicalProduct,<id>,<name>,<price>,<weight>,<dimensions>
//! DigitalProduct,<id>,<name>,<price>,<file_size>,<format>
//! <user_id>,<first_name>,<last_name>,<email>,<password>,<phone_number>,<address>,<role>
//! ```

use crate::types::{Product, ProductDetails, Role, StoreError, User};
use crate::validation::FIELD_DELIMITER;
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Type tag of a physical product line
pub const PHYSICAL_TAG: &str = "PhysicalProduct";

/// Type tag of a digital product line
pub const DIGITAL_TAG: &str = "DigitalProduct";

/// Fields every product line starts with: tag, id, name, price
pub const PRODUCT_BASE_FIELDS: usize = 4;

/// Fields of a complete product line of either variant
pub const PRODUCT_FIELDS: usize = 6;

/// Fields of a user line
pub const USER_FIELDS: usize = 8;

/// A value stored as one delimited line
pub trait Record: Sized {
    /// Zero-based column holding the record key
    const KEY_FIELD: usize;

    /// Name used in log messages
    const LABEL: &'static str;

    /// Key compared by existence checks and deletes
    fn key(&self) -> &str;

    /// Serialize to a single line without terminator
    fn encode(&self) -> String;

    /// Deserialize from the fields of one line
    fn decode(fields: &StringRecord) -> Result<Self, StoreError>;
}

/// Split a raw line into trimmed fields
pub fn split_line(line: &str) -> StringRecord {
    line.split(FIELD_DELIMITER).map(str::trim).collect()
}

/// Decode a raw line into a record
pub fn decode_line<R: Record>(line: &str) -> Result<R, StoreError> {
    R::decode(&split_line(line))
}

/// Key column of a raw line, if the line has one
///
/// Works on raw bytes so a line that is not valid UTF-8 still yields its
/// key column instead of failing the whole scan.
pub fn line_key(line: &[u8], key_field: usize) -> Option<&[u8]> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    line.split(|&b| b == FIELD_DELIMITER as u8)
        .nth(key_field)
        .map(<[u8]>::trim_ascii)
}

fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(value).map_err(|_| StoreError::invalid_number(field, value))
}

impl Record for Product {
    const KEY_FIELD: usize = 1;
    const LABEL: &'static str = "product";

    fn key(&self) -> &str {
        self.id()
    }

    fn encode(&self) -> String {
        let (tag, extra_a, extra_b) = match self.details() {
            ProductDetails::Physical { weight, dimensions } => {
                (PHYSICAL_TAG, weight.to_string(), dimensions.as_str())
            }
            ProductDetails::Digital { file_size, format } => {
                (DIGITAL_TAG, file_size.clone(), format.as_str())
            }
        };

        let price = self.price().to_string();
        [
            tag,
            self.id(),
            self.name(),
            price.as_str(),
            extra_a.as_str(),
            extra_b,
        ]
        .join(",")
    }

    /// Decode a product line
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The line has fewer than 4 fields, or fewer than 6 for its variant
    /// - The type tag is neither `PhysicalProduct` nor `DigitalProduct`
    /// - The price or weight is not a number
    /// - The decoded values break a product invariant
    fn decode(fields: &StringRecord) -> Result<Self, StoreError> {
        if fields.len() < PRODUCT_BASE_FIELDS {
            return Err(StoreError::incomplete_record(
                Self::LABEL,
                PRODUCT_BASE_FIELDS,
                fields.len(),
            ));
        }

        let tag = &fields[0];
        if tag != PHYSICAL_TAG && tag != DIGITAL_TAG {
            return Err(StoreError::unknown_product_type(tag));
        }

        // Extra trailing fields are tolerated and dropped
        if fields.len() < PRODUCT_FIELDS {
            return Err(StoreError::incomplete_record(
                tag,
                PRODUCT_FIELDS,
                fields.len(),
            ));
        }

        let price = parse_decimal("price", &fields[3])?;

        let details = if tag == PHYSICAL_TAG {
            ProductDetails::Physical {
                weight: parse_decimal("weight", &fields[4])?,
                dimensions: fields[5].to_string(),
            }
        } else {
            ProductDetails::Digital {
                file_size: fields[4].to_string(),
                format: fields[5].to_string(),
            }
        };

        Product::new(&fields[1], &fields[2], price, details)
    }
}

/// Positional layout of a user line
#[derive(Debug, Deserialize)]
struct UserRow {
    user_id: String,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    phone_number: String,
    address: String,
    role: String,
}

impl Record for User {
    const KEY_FIELD: usize = 3;
    const LABEL: &'static str = "user";

    fn key(&self) -> &str {
        &self.email
    }

    fn encode(&self) -> String {
        [
            self.user_id.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.password.as_str(),
            self.phone_number.as_str(),
            self.address.as_str(),
            self.role.as_str(),
        ]
        .join(",")
    }

    /// Decode a user line
    ///
    /// Field contents are not re-validated; only the field count and the
    /// role are checked.
    fn decode(fields: &StringRecord) -> Result<Self, StoreError> {
        if fields.len() != USER_FIELDS {
            return Err(StoreError::malformed_user_record(format!(
                "expected {} fields, found {}",
                USER_FIELDS,
                fields.len()
            )));
        }

        let row: UserRow = fields
            .deserialize(None)
            .map_err(|e| StoreError::malformed_user_record(e.to_string()))?;
        let role = Role::from_str(&row.role)
            .map_err(|e| StoreError::malformed_user_record(e.to_string()))?;

        Ok(User {
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password: row.password,
            phone_number: row.phone_number,
            address: row.address,
            role,
        })
    }
}
