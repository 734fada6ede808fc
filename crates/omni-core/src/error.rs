//! Error types and handling for omni-core operations.
//!
//! This module provides the error type shared by every component of the
//! dispatch engine. Errors are categorized so the CLI can map them onto
//! semantic exit codes.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: a required key is missing from the state file
//! - **Credential Errors**: a secret is missing from, or unreadable in, the secure store
//! - **Network Errors**: HTTP failures raised by a backend client
//! - **API Errors**: a backend answered with a non-success status
//! - **I/O and Serialization Errors**: state file access
//!
//! ## Local Recovery
//!
//! Only two failures are handled in place: a corrupt state file is reset to
//! an empty mapping, and a throttled action that lost its debounce race is
//! skipped. Everything else propagates to the process boundary unmodified.
//!
//! ```rust
//! use omni_core::Error;
//!
//! let err = Error::MissingConfiguration { key: "jira_url".to_string() };
//! assert_eq!(err.category(), "config");
//! assert!(err.to_string().contains("jira_url"));
//! ```

use thiserror::Error;

/// The main error type for omni-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required configuration key is absent or empty.
    ///
    /// Raised by [`ConfigStore::get`](crate::ConfigStore::get) when called
    /// with `enforce = true`.
    #[error("No value found for \"{key}\". Try running `omni config set {key} <value>`")]
    MissingConfiguration {
        /// The key that was looked up.
        key: String,
    },

    /// A named secret does not exist in the credential store.
    #[error("No credential found for \"{key}\". Try running `omni config set-secret {key}`")]
    CredentialNotFound {
        /// The credential identifier.
        key: String,
    },

    /// The credential store itself failed (tool missing, permission denied).
    #[error("Credential store error: {0}")]
    Credential(String),

    /// HTTP request to a backend failed.
    ///
    /// Fetch failures are never retried and never fall back to stale data.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A backend answered with a non-success status.
    #[error("API error ({status}) from {service}: {message}")]
    Api {
        /// Backend name, e.g. `github`.
        service: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// I/O operation on the state file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// - `"config"` - missing configuration
    /// - `"credential"` - missing or unreadable secrets
    /// - `"network"` - transport failures and non-success API responses
    /// - `"io"` - file system operations
    /// - `"serialization"` - data format conversion
    /// - `"other"` - uncategorized errors
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::MissingConfiguration { .. } => "config",
            Self::CredentialNotFound { .. } | Self::Credential(_) => "credential",
            Self::Network(_) | Self::Api { .. } => "network",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }

    /// Whether the error came from talking to a backend.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { .. })
    }
}

/// A specialized Result type for omni-core operations.
pub type Result<T> = std::result::Result<T, Error>;
