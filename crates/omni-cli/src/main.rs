use std::process::ExitCode;

use colored::Colorize;
use omni_cli::error::exit_code_from_error;

#[tokio::main]
async fn main() -> ExitCode {
    match omni_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "Error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
