//! Product catalog
//!
//! The catalog has no in-memory copy: every read reloads the backing file, so
//! products appended by any session are visible on the next call. Lines that
//! fail to decode are logged and skipped.

use crate::io::FileStore;
use crate::types::{Product, StoreError};
use tracing::{info, warn};

/// File-backed product catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    store: FileStore<Product>,
}

impl Catalog {
    pub fn new(store: FileStore<Product>) -> Self {
        Catalog { store }
    }

    pub fn store(&self) -> &FileStore<Product> {
        &self.store
    }

    /// Whether a product with this id is stored
    pub fn exists(&self, product_id: &str) -> bool {
        self.store.exists(product_id)
    }

    /// Add a product to the catalog
    ///
    /// Product invariants are already guaranteed by [`Product`] construction;
    /// this only checks uniqueness of the id against every stored line.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A product with the same id is already stored (`DuplicateProduct`)
    /// - The backing file cannot be written
    pub fn add(&self, product: Product) -> Result<(), StoreError> {
        if self.store.exists(product.id()) {
            return Err(StoreError::duplicate_product(product.id()));
        }

        self.store.append(&product)?;
        info!(product_id = product.id(), name = product.name(), "product added");
        Ok(())
    }

    /// Every decodable product, freshly read from the backing file
    ///
    /// Never fails: an unreadable file is logged and yields an empty list.
    pub fn list_all(&self) -> Vec<Product> {
        match self.store.load_all() {
            Ok(loaded) => {
                for skipped in &loaded.skipped {
                    warn!(
                        path = %self.store.path().display(),
                        line = skipped.line,
                        error = %skipped.error,
                        "skipping product line"
                    );
                }
                loaded.records
            }
            Err(e) => {
                warn!(path = %self.store.path().display(), error = %e, "failed to read products");
                Vec::new()
            }
        }
    }

    /// First product with the given id
    ///
    /// # Errors
    ///
    /// Returns `ProductNotFound` if no stored product has this id.
    pub fn find(&self, product_id: &str) -> Result<Product, StoreError> {
        self.list_all()
            .into_iter()
            .find(|product| product.id() == product_id)
            .ok_or_else(|| StoreError::product_not_found(product_id))
    }

    /// Remove a product by id, rewriting the backing file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No stored line has this id (`ProductNotFound`)
    /// - The file could not be rewritten (the original is left intact)
    pub fn remove(&self, product_id: &str) -> Result<(), StoreError> {
        if self.store.delete(product_id)? {
            info!(product_id, "product deleted");
            Ok(())
        } else {
            Err(StoreError::product_not_found(product_id))
        }
    }
}
