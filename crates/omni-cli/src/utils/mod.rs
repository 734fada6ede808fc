//! Shared helpers for the CLI: argument types, logging setup and state-file
//! location.

pub mod cli_args;
pub mod logging;
pub mod paths;

pub use logging::initialize_logging;
