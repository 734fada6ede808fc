use std::sync::Arc;

use omni_core::credentials::{HACKPAD_CLIENT_ID, HACKPAD_SECRET};
use omni_core::{CredentialStore, Result};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{endpoint, ensure_success};

pub const DEFAULT_URL: &str = "https://hackpad.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pad {
    pub id: String,
    pub title: String,
}

pub struct HackpadClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

/// Two-legged OAuth 1.0 with the PLAINTEXT signature method.
struct OAuth {
    consumer_key: SecretString,
    consumer_secret: SecretString,
}

impl OAuth {
    fn params(&self) -> [(&'static str, String); 4] {
        [
            ("oauth_consumer_key", self.consumer_key.expose_secret().to_string()),
            ("oauth_signature_method", "PLAINTEXT".to_string()),
            // PLAINTEXT signs with "<consumer secret>&<token secret>"; there is no token
            ("oauth_signature", format!("{}&", self.consumer_secret.expose_secret())),
            ("oauth_version", "1.0".to_string()),
        ]
    }
}

impl HackpadClient {
    pub fn new(http: Client, base_url: String, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every pad visible to the client, with titles taken from each pad's first line.
    pub async fn all_pads(&self) -> Result<Vec<Pad>> {
        let oauth = OAuth {
            consumer_key: self.credentials.get(HACKPAD_CLIENT_ID).await?,
            consumer_secret: self.credentials.get(HACKPAD_SECRET).await?,
        };

        let response = self
            .http
            .get(endpoint(&self.base_url, "api/1.0/pads/all"))
            .query(&oauth.params())
            .send()
            .await?;
        let ids: Vec<String> = ensure_success("hackpad", response).await?.json().await?;
        debug!(count = ids.len(), "fetching pad titles");

        let mut pads = Vec::with_capacity(ids.len());
        for id in ids {
            let title = self.pad_title(&oauth, &id).await?;
            pads.push(Pad { id, title });
        }
        Ok(pads)
    }

    async fn pad_title(&self, oauth: &OAuth, id: &str) -> Result<String> {
        let response = self
            .http
            .get(endpoint(&self.base_url, &format!("api/1.0/pad/{id}/content/latest.txt")))
            .query(&oauth.params())
            .send()
            .await?;
        let text = ensure_success("hackpad", response).await?.text().await?;
        Ok(first_line(&text).unwrap_or(id).to_string())
    }
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}
