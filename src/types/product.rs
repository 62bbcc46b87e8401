//! Product types for the storefront catalog
//!
//! A product is one value with shared fields and a variant-specific
//! [`ProductDetails`]. Construction validates the shared invariants, so a
//! `Product` in hand always has a non-empty id and name and a positive price.

use crate::types::StoreError;
use crate::validation::validate_field;
use rust_decimal::Decimal;
use std::fmt;

/// Product identifier, unique within the catalog
pub type ProductId = String;

/// Highest accepted price
///
/// Any cart of realistic size stays far below `Decimal::MAX` when summed.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Variant-specific product data
#[derive(Debug, Clone, PartialEq)]
pub enum ProductDetails {
    /// Shipped goods
    Physical {
        /// Weight in kilograms
        weight: Decimal,
        dimensions: String,
    },

    /// Downloadable goods
    Digital {
        /// Human-readable size such as `15MB`
        file_size: String,
        /// File format such as `PDF` or `MP4`
        format: String,
    },
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    details: ProductDetails,
}

impl Product {
    /// Create a product after checking its invariants
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The id or name is empty (`EmptyProductId`, `EmptyProductName`)
    /// - The price is zero or negative (`NonPositivePrice`)
    /// - The price is above [`MAX_PRICE`] (`PriceTooHigh`)
    /// - A text field contains a comma or line break (`InvalidField`)
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        details: ProductDetails,
    ) -> Result<Self, StoreError> {
        let id = id.into();
        let name = name.into();

        if id.trim().is_empty() {
            return Err(StoreError::EmptyProductId);
        }
        if name.trim().is_empty() {
            return Err(StoreError::EmptyProductName);
        }
        if price <= Decimal::ZERO {
            return Err(StoreError::NonPositivePrice { price });
        }
        if price > MAX_PRICE {
            return Err(StoreError::PriceTooHigh {
                price,
                max: MAX_PRICE,
            });
        }

        validate_field("product_id", &id)?;
        validate_field("name", &name)?;
        match &details {
            ProductDetails::Physical { dimensions, .. } => {
                validate_field("dimensions", dimensions)?;
            }
            ProductDetails::Digital { file_size, format } => {
                validate_field("file_size", file_size)?;
                validate_field("format", format)?;
            }
        }

        Ok(Product {
            id,
            name,
            price,
            details,
        })
    }

    /// Create a physical product
    pub fn physical(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        weight: Decimal,
        dimensions: impl Into<String>,
    ) -> Result<Self, StoreError> {
        Product::new(
            id,
            name,
            price,
            ProductDetails::Physical {
                weight,
                dimensions: dimensions.into(),
            },
        )
    }

    /// Create a digital product
    pub fn digital(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        file_size: impl Into<String>,
        format: impl Into<String>,
    ) -> Result<Self, StoreError> {
        Product::new(
            id,
            name,
            price,
            ProductDetails::Digital {
                file_size: file_size.into(),
                format: format.into(),
            },
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    /// Short label used in listings
    pub fn kind_label(&self) -> &'static str {
        match self.details {
            ProductDetails::Physical { .. } => "Physical Product",
            ProductDetails::Digital { .. } => "Digital Product",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - {}", self.kind_label(), self.name)?;
        writeln!(f, "  Product ID: {}", self.id)?;
        write!(f, "  Price: ${}", self.price)?;
        match &self.details {
            ProductDetails::Physical { weight, dimensions } => {
                write!(f, "\n  Weight: {} kg\n  Dimensions: {}", weight, dimensions)
            }
            ProductDetails::Digital { file_size, format } => {
                write!(f, "\n  File Size: {}\n  Format: {}", file_size, format)
            }
        }
    }
}
