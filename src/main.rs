//! Console Storefront CLI
//!
//! Interactive buyer/seller storefront over flat product and user files.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --products-file data/products.txt --users-file data/users.txt
//! cargo run -- --payment-delay-ms 0 --log-level debug
//! ```
//!
//! Menus and results are written to stdout. Logs go to stderr, filtered by
//! `RUST_LOG` when set and by `--log-level` otherwise.
//!
//! # Exit Codes
//!
//! - 0: Session ended (Exit chosen or end of input)
//! - 1: Error (console input or output failed)

use rust_storefront::cli;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Logs go to stderr so they never interleave with the menus
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = args.to_config();
    let stdin = io::stdin();
    if let Err(e) = cli::run(&config, stdin.lock(), io::stdout()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
