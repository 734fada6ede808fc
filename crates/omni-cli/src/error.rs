//! CLI error handling with semantic exit codes.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Rows emitted (possibly none) |
//! | 1 | `Internal` | Unexpected error, state file I/O |
//! | 2 | `Usage` | Invalid arguments or flag combinations |
//! | 3 | `NotFound` | Unknown key or resource |
//! | 5 | `Network` | Backend request failed or returned an error status |
//! | 6 | `Config` | Missing configuration key or credential |
//!
//! A launcher invoking `omni` only sees stdout on success, so the exit code
//! is the one signal that distinguishes "nothing matched" from "something
//! broke".

use std::fmt;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments (exit code 2). Clap's own parse errors use the same code.
    Usage = 2,

    /// Requested resource not found (exit code 3).
    NotFound = 3,

    /// Network or backend failure (exit code 5).
    Network = 5,

    /// Missing configuration or credentials (exit code 6).
    Config = 6,
}

impl ErrorCategory {
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Network => "network error",
            Self::Config => "configuration error",
        }
    }

    /// Category for a core library error.
    #[must_use]
    pub const fn from_core(err: &omni_core::Error) -> Self {
        use omni_core::Error;
        match err {
            Error::MissingConfiguration { .. }
            | Error::CredentialNotFound { .. }
            | Error::Credential(_) => Self::Config,
            Error::Network(_) | Error::Api { .. } => Self::Network,
            Error::Io(_) | Error::Serialization(_) | Error::Other(_) => Self::Internal,
        }
    }

    /// Heuristic fallback for errors that carry no category.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("network")
            || msg_lower.contains("connection")
            || msg_lower.contains("http")
            || msg_lower.contains("timed out")
        {
            return Self::Network;
        }

        if msg_lower.contains("not found") || msg_lower.contains("no such") {
            return Self::NotFound;
        }

        if msg_lower.contains("invalid argument") || msg_lower.contains("missing required") {
            return Self::Usage;
        }

        Self::Internal
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
#[derive(Debug)]
pub struct CliError {
    pub category: ErrorCategory,
    pub source: anyhow::Error,
}

impl CliError {
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::NotFound, source)
    }

    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// Explicit [`CliError`]s win, then core errors anywhere in the chain, then
/// message inference.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    if let Some(core_err) = err.chain().find_map(|cause| cause.downcast_ref::<omni_core::Error>()) {
        return ErrorCategory::from_core(core_err).exit_code();
    }

    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}
