//! # Output Formatting
//!
//! Rows produced by the dispatcher leave the process in one of three shapes:
//!
//! - **Alfred**: the launcher's script-filter JSON (`{"items": [...]}`)
//! - **JSON**: a pretty-printed array of rows for scripting
//! - **Text**: one line per row for humans at a terminal
//!
//! Rendering returns a `String` so callers write to stdout only once a
//! command has fully succeeded.

mod alfred;
mod json;
mod text;

use anyhow::Result;
use omni_core::DisplayRow;

pub use alfred::WEB_ICON_PATH;

/// Output format options supported by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Alfred script-filter JSON (default when piped)
    Alfred,
    /// Pretty JSON array of rows
    Json,
    /// Human-readable lines (default on a terminal)
    Text,
}

impl OutputFormat {
    /// Whether the format is meant for another program rather than a person.
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Alfred | Self::Json)
    }

    pub fn render(self, rows: &[DisplayRow]) -> Result<String> {
        match self {
            Self::Alfred => alfred::render(rows),
            Self::Json => json::render(rows),
            Self::Text => Ok(text::render(rows)),
        }
    }
}

/// Render `rows` and write them to stdout in one go.
pub fn emit(rows: &[DisplayRow], format: OutputFormat) -> Result<()> {
    use std::io::Write;

    let rendered = format.render(rows)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
