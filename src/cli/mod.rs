// CLI module
// Command-line arguments and the interactive console

mod args;
mod console;

pub use args::CliArgs;
pub use console::Console;

use crate::config::StoreConfig;
use crate::types::StoreError;
use clap::Parser;
use std::io::{BufRead, Write};
use tracing::info;

/// Parse command-line arguments using clap
///
/// This function parses the command-line arguments and returns a `CliArgs` struct
/// containing the parsed values. If parsing fails (e.g., invalid arguments or the
/// --help flag), clap will automatically display an error message or help text
/// and exit the process.
///
/// # Returns
///
/// Returns a `CliArgs` struct with the parsed command-line arguments.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Open the stores named by the config and run one console session
///
/// The account directory is loaded once here and shared by every login of
/// the session. The catalog re-reads its file on every operation.
///
/// # Arguments
///
/// * `config` - File locations and payment delay
/// * `input` - Source of user answers, one per line
/// * `output` - Destination of menus and results
///
/// # Errors
///
/// Returns an error only if the console input or output fails.
pub fn run<R: BufRead, W: Write>(
    config: &StoreConfig,
    input: R,
    output: W,
) -> Result<(), StoreError> {
    let mut directory = config.open_directory();
    let catalog = config.open_catalog();
    info!(
        users_file = %config.users_file.display(),
        products_file = %config.products_file.display(),
        accounts = directory.len(),
        "storefront started"
    );

    let mut console = Console::new(input, output, config.payment_delay);
    console.run(&mut directory, &catalog)
}
