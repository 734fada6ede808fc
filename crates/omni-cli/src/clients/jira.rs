use std::sync::Arc;

use chrono::{DateTime, Utc};
use omni_core::credentials::{JIRA_PASSWORD, JIRA_USERNAME};
use omni_core::{CredentialStore, Error, Result};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::{endpoint, ensure_success};

const ASSIGNED_JQL: &str = "assignee = currentUser() AND resolution = Unresolved ORDER BY updated DESC";

/// Jira writes offsets without a colon (`+0000`), which RFC 3339 rejects.
const JIRA_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraIssue {
    pub key: String,
    pub summary: String,
    pub updated: DateTime<Utc>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<RawIssue>,
}

#[derive(Deserialize)]
struct RawIssue {
    key: String,
    fields: RawFields,
}

#[derive(Deserialize)]
struct RawFields {
    #[serde(default)]
    summary: String,
    updated: String,
}

impl TryFrom<RawIssue> for JiraIssue {
    type Error = Error;

    fn try_from(raw: RawIssue) -> Result<Self> {
        let updated = DateTime::parse_from_str(&raw.fields.updated, JIRA_TIMESTAMP)
            .map_err(|e| {
                Error::Serialization(format!("bad timestamp on {}: {e}", raw.key))
            })?
            .with_timezone(&Utc);
        Ok(Self {
            key: raw.key,
            summary: raw.fields.summary,
            updated,
        })
    }
}

pub struct JiraClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl JiraClient {
    pub fn new(http: Client, base_url: String, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// Unresolved issues assigned to the authenticated user, most recently updated first.
    pub async fn assigned_issues(&self) -> Result<Vec<JiraIssue>> {
        let user = self.credentials.get(JIRA_USERNAME).await?;
        let password = self.credentials.get(JIRA_PASSWORD).await?;

        let response = self
            .http
            .get(endpoint(&self.base_url, "rest/api/2/search"))
            .basic_auth(user.expose_secret(), Some(password.expose_secret()))
            .query(&[
                ("jql", ASSIGNED_JQL),
                ("fields", "summary,updated"),
                ("maxResults", "100"),
            ])
            .send()
            .await?;

        let page: SearchResponse = ensure_success("jira", response).await?.json().await?;
        page.issues.into_iter().map(JiraIssue::try_from).collect()
    }
}
