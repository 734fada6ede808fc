//! One [`Handler`](omni_core::Handler) per listing mode.
//!
//! Handlers own their client and any construction parameters; the cache key
//! is derived from those parameters so different repositories never share a
//! record.

mod github;
mod hackpad;
mod jira;
mod jive;
mod trello;

use std::time::Duration;

pub use github::{CommitsHandler, EmojiHandler, PullRequestsHandler};
pub use hackpad::PadsHandler;
pub use jira::MyIssuesHandler;
pub use jive::ActivityHandler;
pub use trello::BoardsHandler;

/// Cache-key fragment for a construction parameter: the scheme is dropped
/// and anything other than ASCII letters and digits becomes `_`.
fn key_part(raw: &str) -> String {
    let without_scheme = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    without_scheme
        .trim_end_matches('/')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Default freshness window for backend listings.
pub const FIVE_MINUTES: Duration = Duration::from_secs(5 * 60);
