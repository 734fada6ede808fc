use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use omni_core::{DisplayRow, Handler, Icon, Result, age_since};

use super::FIVE_MINUTES;
use crate::clients::GithubClient;
use crate::clients::github::{Commit, Emoji, PullRequest};

const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn repo_key(repo: &str, suffix: &str) -> String {
    format!("{}_{suffix}", repo.replace('/', "_"))
}

/// Open pull requests of one repository.
pub struct PullRequestsHandler {
    client: Arc<GithubClient>,
    repo: String,
}

impl PullRequestsHandler {
    pub fn new(client: Arc<GithubClient>, repo: impl Into<String>) -> Self {
        Self {
            client,
            repo: repo.into(),
        }
    }
}

#[async_trait]
impl Handler for PullRequestsHandler {
    type Item = PullRequest;

    fn cache_key(&self) -> String {
        repo_key(&self.repo, "prs")
    }

    fn ttl(&self) -> Duration {
        FIVE_MINUTES
    }

    async fn fetch(&self) -> Result<Vec<PullRequest>> {
        self.client.pull_requests(&self.repo).await
    }

    fn match_text(&self, item: &PullRequest) -> String {
        format!("{} {} {}", item.number, item.username, item.title)
    }

    fn render(&self, item: &PullRequest) -> DisplayRow {
        DisplayRow::new(
            format!("{}: {}", item.number, item.title),
            format!("[{}] Updated {}", item.username, age_since(item.updated)),
            &item.html_url,
        )
        .with_icon(Icon::Web)
    }
}

/// Recent commits of one repository.
pub struct CommitsHandler {
    client: Arc<GithubClient>,
    repo: String,
}

impl CommitsHandler {
    pub fn new(client: Arc<GithubClient>, repo: impl Into<String>) -> Self {
        Self {
            client,
            repo: repo.into(),
        }
    }
}

#[async_trait]
impl Handler for CommitsHandler {
    type Item = Commit;

    fn cache_key(&self) -> String {
        repo_key(&self.repo, "commits")
    }

    fn ttl(&self) -> Duration {
        FIVE_MINUTES
    }

    async fn fetch(&self) -> Result<Vec<Commit>> {
        self.client.commits(&self.repo).await
    }

    fn match_text(&self, item: &Commit) -> String {
        format!("{} {}", item.username, item.message)
    }

    fn render(&self, item: &Commit) -> DisplayRow {
        DisplayRow::new(
            &item.message,
            format!("[{}] Updated {}", item.username, age_since(item.date)),
            &item.html_url,
        )
        .with_icon(Icon::Web)
    }
}

/// GitHub's emoji catalogue. Changes rarely, so it is kept for a day.
pub struct EmojiHandler {
    client: Arc<GithubClient>,
}

impl EmojiHandler {
    pub const fn new(client: Arc<GithubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Handler for EmojiHandler {
    type Item = Emoji;

    fn cache_key(&self) -> String {
        "github_emoji".to_string()
    }

    fn ttl(&self) -> Duration {
        ONE_DAY
    }

    async fn fetch(&self) -> Result<Vec<Emoji>> {
        self.client.emoji().await
    }

    fn match_text(&self, item: &Emoji) -> String {
        item.name.clone()
    }

    fn render(&self, item: &Emoji) -> DisplayRow {
        DisplayRow::new(&item.name, &item.url, &item.url)
    }
}
