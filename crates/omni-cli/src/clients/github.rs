use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use omni_core::credentials::GITHUB_TOKEN;
use omni_core::{CredentialStore, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::{endpoint, ensure_success};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub username: String,
    pub html_url: String,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// First line of the commit message.
    pub message: String,
    pub username: String,
    pub html_url: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    pub name: String,
    pub url: String,
}

#[derive(Deserialize)]
struct RawUser {
    login: String,
}

#[derive(Deserialize)]
struct RawPull {
    number: u64,
    title: String,
    html_url: String,
    updated_at: DateTime<Utc>,
    user: Option<RawUser>,
}

#[derive(Deserialize)]
struct RawCommit {
    html_url: String,
    commit: RawCommitDetail,
    author: Option<RawUser>,
}

#[derive(Deserialize)]
struct RawCommitDetail {
    message: String,
    author: RawGitAuthor,
}

#[derive(Deserialize)]
struct RawGitAuthor {
    name: String,
    date: DateTime<Utc>,
}

pub struct GithubClient {
    http: Client,
    api_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl GithubClient {
    pub fn new(http: Client, api_url: String, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            http,
            api_url,
            credentials,
        }
    }

    async fn get(&self, path: &str) -> Result<RequestBuilder> {
        let token = self.credentials.get(GITHUB_TOKEN).await?;
        Ok(self
            .http
            .get(endpoint(&self.api_url, path))
            .bearer_auth(token.expose_secret())
            .header(ACCEPT, "application/vnd.github+json"))
    }

    /// Open pull requests of `repo` (`owner/name`).
    pub async fn pull_requests(&self, repo: &str) -> Result<Vec<PullRequest>> {
        let response = self
            .get(&format!("repos/{repo}/pulls"))
            .await?
            .query(&[("state", "open"), ("sort", "updated"), ("direction", "desc")])
            .send()
            .await?;
        let raw: Vec<RawPull> = ensure_success("github", response).await?.json().await?;

        Ok(raw
            .into_iter()
            .map(|pr| PullRequest {
                number: pr.number,
                title: pr.title,
                username: pr.user.map(|u| u.login).unwrap_or_default(),
                html_url: pr.html_url,
                updated: pr.updated_at,
            })
            .collect())
    }

    /// Recent commits on the default branch of `repo`.
    pub async fn commits(&self, repo: &str) -> Result<Vec<Commit>> {
        let response = self.get(&format!("repos/{repo}/commits")).await?.send().await?;
        let raw: Vec<RawCommit> = ensure_success("github", response).await?.json().await?;

        Ok(raw
            .into_iter()
            .map(|c| Commit {
                message: c.commit.message.lines().next().unwrap_or_default().to_string(),
                username: c.author.map_or(c.commit.author.name, |u| u.login),
                html_url: c.html_url,
                date: c.commit.author.date,
            })
            .collect())
    }

    /// The emoji catalogue, sorted by name.
    pub async fn emoji(&self) -> Result<Vec<Emoji>> {
        let response = self.get("emojis").await?.send().await?;
        let raw: BTreeMap<String, String> = ensure_success("github", response).await?.json().await?;
        Ok(raw.into_iter().map(|(name, url)| Emoji { name, url }).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clients::build_http_client;
    use omni_core::{Error, MemoryStore};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GithubClient {
        let credentials = MemoryStore::new().with(GITHUB_TOKEN, "ghp_test");
        GithubClient::new(build_http_client().unwrap(), server.uri(), Arc::new(credentials))
    }

    #[tokio::test]
    async fn pull_requests_carry_author_and_timestamp() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/web/pulls"))
            .and(query_param("state", "open"))
            .and(header("authorization", "Bearer ghp_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "number": 42,
                    "title": "Speed up CI",
                    "html_url": "https://github.com/acme/web/pull/42",
                    "updated_at": "2024-05-01T12:00:00Z",
                    "user": { "login": "octocat" }
                }
            ])))
            .mount(&server)
            .await;

        let prs = client(&server).pull_requests("acme/web").await.unwrap();
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].number, 42);
        assert_eq!(prs[0].username, "octocat");
    }

    #[tokio::test]
    async fn commits_use_first_message_line_and_fall_back_to_git_author() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/web/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "html_url": "https://github.com/acme/web/commit/abc",
                    "commit": {
                        "message": "Fix flaky test\n\nLonger explanation",
                        "author": { "name": "Ada", "date": "2024-05-02T08:00:00Z" }
                    },
                    "author": null
                }
            ])))
            .mount(&server)
            .await;

        let commits = client(&server).commits("acme/web").await.unwrap();
        assert_eq!(commits[0].message, "Fix flaky test");
        assert_eq!(commits[0].username, "Ada");
    }

    #[tokio::test]
    async fn emoji_are_sorted_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/emojis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tada": "https://e/tada.png",
                "+1": "https://e/plus1.png",
                "smile": "https://e/smile.png"
            })))
            .mount(&server)
            .await;

        let names: Vec<_> = client(&server)
            .emoji()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["+1", "smile", "tada"]);
    }

    #[tokio::test]
    async fn not_found_repo_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let err = client(&server).pull_requests("acme/nope").await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 404, ref message, .. } if message == "Not Found"));
    }
}
