//! Runtime configuration
//!
//! `StoreConfig` carries the file locations and the simulated payment delay
//! from the command line into the application.

use crate::core::{AccountDirectory, Catalog, DEFAULT_PAYMENT_DELAY};
use crate::io::FileStore;
use std::path::PathBuf;
use std::time::Duration;

/// Default product file name, relative to the working directory
pub const DEFAULT_PRODUCTS_FILE: &str = "products.txt";

/// Default user file name, relative to the working directory
pub const DEFAULT_USERS_FILE: &str = "users.txt";

/// Configuration for one storefront process
#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    /// Backing file of the product catalog
    pub products_file: PathBuf,
    /// Backing file of the account directory
    pub users_file: PathBuf,
    /// How long the simulated gateway blocks before approving
    pub payment_delay: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            products_file: PathBuf::from(DEFAULT_PRODUCTS_FILE),
            users_file: PathBuf::from(DEFAULT_USERS_FILE),
            payment_delay: DEFAULT_PAYMENT_DELAY,
        }
    }
}

impl StoreConfig {
    pub fn open_catalog(&self) -> Catalog {
        Catalog::new(FileStore::new(&self.products_file))
    }

    /// Load the account directory from the configured user file
    pub fn open_directory(&self) -> AccountDirectory {
        AccountDirectory::open(FileStore::new(&self.users_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();

        assert_eq!(config.products_file, PathBuf::from("products.txt"));
        assert_eq!(config.users_file, PathBuf::from("users.txt"));
        assert_eq!(config.payment_delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_opens_stores_at_configured_paths() {
        let dir = tempdir().expect("Failed to create temp dir");
        let users_file = dir.path().join("accounts.txt");
        fs::write(
            &users_file,
            "123,Jane,Doe,jane@example.com,Passw0rd!,0123456789,456 Ave,buyer\n",
        )
        .unwrap();

        let config = StoreConfig {
            products_file: dir.path().join("catalog.txt"),
            users_file,
            payment_delay: Duration::ZERO,
        };

        assert_eq!(config.open_directory().len(), 1);
        assert_eq!(config.open_catalog().store().path(), dir.path().join("catalog.txt"));
    }
}
