use std::sync::Arc;

use omni_core::credentials::{JIVE_PASSWORD, JIVE_USERNAME};
use omni_core::{CredentialStore, Result};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::{endpoint, ensure_success};

/// Jive prefixes every JSON body with this guard against script inclusion.
const JSON_GUARD: &str = "throw 'allowIllegalResourceCall is false.';";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiveActivity {
    pub title: String,
    pub url: String,
    pub actor_name: String,
    pub summary: String,
    pub verb: String,
    pub object_type: String,
}

#[derive(Deserialize)]
struct ActivityPage {
    #[serde(default)]
    list: Vec<RawActivity>,
}

#[derive(Deserialize)]
struct RawActivity {
    #[serde(default)]
    title: String,
    #[serde(default)]
    verb: String,
    #[serde(default)]
    content: String,
    actor: RawActor,
    object: RawObject,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawActor {
    #[serde(default)]
    display_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObject {
    #[serde(default)]
    object_type: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    url: String,
}

impl From<RawActivity> for JiveActivity {
    fn from(raw: RawActivity) -> Self {
        let title = if raw.object.display_name.is_empty() {
            raw.title
        } else {
            raw.object.display_name
        };
        Self {
            title,
            url: raw.object.url,
            actor_name: raw.actor.display_name,
            summary: raw.object.summary.unwrap_or(raw.content),
            verb: raw.verb,
            object_type: raw.object.object_type,
        }
    }
}

pub struct JiveClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl JiveClient {
    pub fn new(http: Client, base_url: String, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// The authenticated user's activity stream, newest first.
    pub async fn activity(&self) -> Result<Vec<JiveActivity>> {
        let user = self.credentials.get(JIVE_USERNAME).await?;
        let password = self.credentials.get(JIVE_PASSWORD).await?;

        let response = self
            .http
            .get(endpoint(&self.base_url, "api/core/v3/activities"))
            .basic_auth(user.expose_secret(), Some(password.expose_secret()))
            .query(&[("count", "50")])
            .send()
            .await?;

        let body = ensure_success("jive", response).await?.text().await?;
        let page: ActivityPage = serde_json::from_str(strip_json_guard(&body))?;
        Ok(page.list.into_iter().map(JiveActivity::from).collect())
    }
}

fn strip_json_guard(body: &str) -> &str {
    let trimmed = body.trim_start();
    trimmed.strip_prefix(JSON_GUARD).unwrap_or(trimmed)
}
