//! Thin HTTP clients for each backend.
//!
//! Clients turn backend responses into the records the handlers cache and
//! render. Credentials are looked up per request so a fresh cache record can
//! be served without touching the credential store.

pub mod github;
pub mod hackpad;
pub mod jira;
pub mod jive;
pub mod trello;

use std::time::Duration;

use omni_core::{Error, Result};
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

pub use github::GithubClient;
pub use hackpad::HackpadClient;
pub use jira::JiraClient;
pub use jive::JiveClient;
pub use trello::TrelloClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY: usize = 200;

/// Shared HTTP client with the CLI's timeout and user agent.
pub fn build_http_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("omni/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Error::Network)
}

/// Validate a configured base URL and strip any trailing slash.
pub fn normalize_base_url(key: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    Url::parse(trimmed).map_err(|e| Error::Other(format!("invalid URL for \"{key}\": {e}")))?;
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Turn a non-success response into [`Error::Api`].
async fn ensure_success(service: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    let message = if body.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        body.chars().take(MAX_ERROR_BODY).collect()
    };
    debug!(service, status = status.as_u16(), "backend returned an error");

    Err(Error::Api {
        service,
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn base_urls_lose_trailing_slash() {
        assert_eq!(
            normalize_base_url("jira_url", "https://jira.example.com/").unwrap(),
            "https://jira.example.com"
        );
    }

    #[test]
    fn invalid_base_url_names_the_key() {
        let err = normalize_base_url("jive_url", "not a url").unwrap_err();
        assert!(err.to_string().contains("jive_url"));
    }

    #[test]
    fn endpoints_join_with_single_slash() {
        assert_eq!(endpoint("https://a/", "/x/y"), "https://a/x/y");
        assert_eq!(endpoint("https://a", "x"), "https://a/x");
    }
}
