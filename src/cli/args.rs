use crate::config::{StoreConfig, DEFAULT_PRODUCTS_FILE, DEFAULT_USERS_FILE};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Console storefront over flat-file product and user stores
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Console storefront over flat-file product and user stores", long_about = None)]
pub struct CliArgs {
    /// Product file path
    #[arg(
        long = "products-file",
        value_name = "PATH",
        default_value = DEFAULT_PRODUCTS_FILE,
        help = "Path to the product file (created on first write)"
    )]
    pub products_file: PathBuf,

    /// User file path
    #[arg(
        long = "users-file",
        value_name = "PATH",
        default_value = DEFAULT_USERS_FILE,
        help = "Path to the user file (created on first signup)"
    )]
    pub users_file: PathBuf,

    /// Simulated payment processing delay in milliseconds
    #[arg(
        long = "payment-delay-ms",
        value_name = "MS",
        default_value_t = 2000,
        help = "Milliseconds the simulated payment blocks before approving"
    )]
    pub payment_delay_ms: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level or filter directive; RUST_LOG takes precedence"
    )]
    pub log_level: String,
}

impl CliArgs {
    /// Create a StoreConfig from CLI arguments
    ///
    /// # Returns
    ///
    /// A `StoreConfig` carrying the file paths and payment delay.
    pub fn to_config(&self) -> StoreConfig {
        StoreConfig {
            products_file: self.products_file.clone(),
            users_file: self.users_file.clone(),
            payment_delay: Duration::from_millis(self.payment_delay_ms),
        }
    }
}
