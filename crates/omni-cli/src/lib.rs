//! omni CLI - one launcher front-end for Jira, GitHub, Jive, Hackpad and Trello
//!
//! Each invocation parses its flags, opens the state file, runs a single
//! handler through the dispatcher and writes the resulting rows to stdout in
//! the selected format. Errors go to stderr with a semantic exit code.
use anyhow::Result;
use clap::Parser;
use tracing::debug;

pub mod cli;
mod clients;
mod commands;
mod context;
pub mod error;
mod handlers;
mod keys;
pub mod output;
mod utils;

use crate::cli::{Cli, Commands};
use crate::context::AppContext;
use crate::utils::initialize_logging;
use crate::utils::paths::resolve_state_file;

/// Execute the omni CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging setup, state file access, or the command fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute_command(&cli).await
}

async fn execute_command(cli: &Cli) -> Result<()> {
    let state_file = resolve_state_file(cli.state_file.as_deref());
    debug!(path = %state_file.display(), "using state file");

    let rows = match &cli.command {
        Commands::Config { command } => {
            let store = omni_core::ConfigStore::open(&state_file)?;
            return commands::manage_config(command, &store).await;
        },
        Commands::Jira(args) => commands::list_issues(&AppContext::open(&state_file)?, args).await?,
        Commands::Github(args) => {
            commands::list_github(&AppContext::open(&state_file)?, args).await?
        },
        Commands::Jive(args) => {
            commands::list_activity(&AppContext::open(&state_file)?, args).await?
        },
        Commands::Hackpad(args) => commands::list_pads(&AppContext::open(&state_file)?, args).await?,
        Commands::Trello(args) if args.createcard => {
            commands::create_card(&AppContext::open(&state_file)?, args).await?
        },
        Commands::Trello(args) => commands::list_boards(&AppContext::open(&state_file)?, args).await?,
    };

    output::emit(&rows, cli.format.resolve())
}
