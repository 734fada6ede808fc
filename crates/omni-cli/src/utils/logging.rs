//! Logging initialization and configuration.
//!
//! Logs always go to stderr; stdout belongs to the row output.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

/// Initialize the logging subsystem based on CLI flags.
///
/// Machine-readable output formats drop the level to ERROR unless
/// `--verbose`/`--debug` was given explicitly, and turn colors off.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let machine_output = cli.format.resolve().is_machine();

    let level = if cli.verbose || cli.debug {
        Level::DEBUG
    } else if cli.quiet || machine_output {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}
