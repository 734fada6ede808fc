//! Command implementations for the omni CLI
//!
//! Listing commands return the rows to emit; the caller renders them only
//! after the whole command has succeeded, so a failure never leaves partial
//! output on stdout.

mod config;
mod github;
mod hackpad;
mod jira;
mod jive;
mod trello;

pub use config::execute as manage_config;
pub use github::execute as list_github;
pub use hackpad::execute as list_pads;
pub use jira::execute as list_issues;
pub use jive::execute as list_activity;
pub use trello::{create_card, list_boards};
