//! # CLI Structure and Argument Parsing
//!
//! One subcommand per backend, each with a required, mutually exclusive mode
//! flag, plus `config` for managing the state file and credentials.
//!
//! ```bash
//! omni jira --me --query billing
//! omni github --prs --repo rust-lang/rust
//! omni github --emoji --query tada
//! omni trello --createcard --query "Call the bank"
//! omni config set jira_url https://jira.example.com
//! ```
//!
//! Missing or conflicting mode flags are rejected by clap before any state is
//! touched, with exit code 2.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::utils::cli_args::FormatArg;

/// Main CLI structure for the `omni` command
#[derive(Parser, Clone, Debug)]
#[command(name = "omni")]
#[command(version)]
#[command(about = "omni - one launcher front-end for Jira, GitHub, Jive, Hackpad and Trello", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// State file holding configuration, cache records and throttle timestamps
    #[arg(long, value_name = "PATH", env = "OMNI_STATE_FILE", global = true)]
    pub state_file: Option<PathBuf>,

    #[command(flatten)]
    pub format: FormatArg,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Jira issues
    Jira(JiraArgs),
    /// GitHub pull requests, commits and emoji
    Github(GithubArgs),
    /// Jive activity stream
    Jive(JiveArgs),
    /// Hackpad pads
    Hackpad(HackpadArgs),
    /// Trello boards and card creation
    Trello(TrelloArgs),
    /// Manage stored configuration and credentials
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Fuzzy filter applied to the fetched list.
#[derive(Args, Clone, Debug, Default)]
pub struct QueryArg {
    /// Text to match against each entry; empty lists everything
    #[arg(long, value_name = "Q")]
    pub query: Option<String>,
}

impl QueryArg {
    pub fn as_str(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }
}

#[derive(Args, Clone, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["me"])))]
pub struct JiraArgs {
    /// Unresolved issues assigned to you
    #[arg(long)]
    pub me: bool,

    #[command(flatten)]
    pub query: QueryArg,
}

#[derive(Args, Clone, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["prs", "commits", "emoji"])))]
pub struct GithubArgs {
    /// Open pull requests of `--repo`
    #[arg(long, requires = "repo")]
    pub prs: bool,

    /// Recent commits of `--repo`
    #[arg(long, requires = "repo")]
    pub commits: bool,

    /// GitHub's emoji catalogue
    #[arg(long)]
    pub emoji: bool,

    /// Repository as OWNER/NAME
    #[arg(long, value_name = "OWNER/NAME", value_parser = parse_repo)]
    pub repo: Option<String>,

    #[command(flatten)]
    pub query: QueryArg,
}

#[derive(Args, Clone, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["activity"])))]
pub struct JiveArgs {
    /// Your activity stream
    #[arg(long)]
    pub activity: bool,

    #[command(flatten)]
    pub query: QueryArg,
}

#[derive(Args, Clone, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["pads"])))]
pub struct HackpadArgs {
    /// Every pad you can see
    #[arg(long)]
    pub pads: bool,

    #[command(flatten)]
    pub query: QueryArg,
}

#[derive(Args, Clone, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["boards", "createcard"])))]
pub struct TrelloArgs {
    /// Your boards
    #[arg(long)]
    pub boards: bool,

    /// Create a card named after `--query` in the configured list
    #[arg(long)]
    pub createcard: bool,

    #[command(flatten)]
    pub query: QueryArg,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigCommand {
    /// Store a configuration value
    Set { key: String, value: String },
    /// Print a configuration value
    Get { key: String },
    /// Print every configuration value (cache records excluded)
    List,
    /// Read a secret from stdin into the credential store
    SetSecret { key: String },
}

fn parse_repo(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    match trimmed.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(trimmed.to_string())
        },
        _ => Err(format!("expected OWNER/NAME, got '{raw}'")),
    }
}
