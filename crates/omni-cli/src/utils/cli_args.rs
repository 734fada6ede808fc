use clap::Args;
use is_terminal::IsTerminal;

use crate::output::OutputFormat;

/// Global `--format` / `-f` flag.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct FormatArg {
    /// Output format; defaults to `alfred` when piped and `text` on a terminal
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        env = "OMNI_OUTPUT_FORMAT",
        global = true
    )]
    pub format: Option<OutputFormat>,
}

impl FormatArg {
    /// Returns the effective output format. A launcher reads our stdout
    /// through a pipe, so without an explicit choice a non-terminal stdout
    /// gets the launcher's format.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }

        if std::io::stdout().is_terminal() {
            OutputFormat::Text
        } else {
            OutputFormat::Alfred
        }
    }
}
