//! Per-invocation wiring: one state file, one dispatcher, one credential chain.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use omni_core::{
    CacheManager, ChainStore, ConfigStore, CredentialStore, Dispatcher, EnvStore, KeychainStore,
};
use reqwest::Client;

use crate::clients::{
    GithubClient, HackpadClient, JiraClient, JiveClient, TrelloClient, build_http_client, github,
    hackpad, normalize_base_url, trello,
};
use crate::keys;

pub struct AppContext {
    pub store: ConfigStore,
    pub dispatcher: Dispatcher,
    credentials: Arc<dyn CredentialStore>,
    http: Client,
}

impl AppContext {
    /// Open the state file and read credentials from the environment, then the keychain.
    pub fn open(state_file: &Path) -> Result<Self> {
        let credentials = ChainStore::new(vec![
            Box::new(EnvStore::new()),
            Box::new(KeychainStore::default()),
        ]);
        Self::with_credentials(ConfigStore::open(state_file)?, Arc::new(credentials))
    }

    pub fn with_credentials(
        store: ConfigStore,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        Ok(Self {
            dispatcher: Dispatcher::new(CacheManager::new(store.clone())),
            store,
            credentials,
            http: build_http_client()?,
        })
    }

    /// A required URL from config.
    pub fn required_url(&self, key: &str) -> Result<String> {
        let raw = self.store.get_str(key)?;
        Ok(normalize_base_url(key, &raw)?)
    }

    /// A URL from config, or `default` when unset.
    pub fn url_or(&self, key: &str, default: &str) -> Result<String> {
        let raw = self
            .store
            .get_str_optional(key)
            .unwrap_or_else(|| default.to_string());
        Ok(normalize_base_url(key, &raw)?)
    }

    pub fn jira_client(&self, base_url: String) -> JiraClient {
        JiraClient::new(self.http.clone(), base_url, Arc::clone(&self.credentials))
    }

    pub fn jive_client(&self) -> Result<JiveClient> {
        let base_url = self.required_url(keys::JIVE_URL)?;
        Ok(JiveClient::new(self.http.clone(), base_url, Arc::clone(&self.credentials)))
    }

    pub fn github_client(&self) -> Result<GithubClient> {
        let base_url = self.url_or(keys::GITHUB_API_URL, github::DEFAULT_API_URL)?;
        Ok(GithubClient::new(self.http.clone(), base_url, Arc::clone(&self.credentials)))
    }

    pub fn hackpad_client(&self) -> Result<HackpadClient> {
        let base_url = self.url_or(keys::HACKPAD_URL, hackpad::DEFAULT_URL)?;
        Ok(HackpadClient::new(self.http.clone(), base_url, Arc::clone(&self.credentials)))
    }

    pub fn trello_client(&self) -> Result<TrelloClient> {
        let base_url = self.url_or(keys::TRELLO_API_URL, trello::DEFAULT_API_URL)?;
        Ok(TrelloClient::new(self.http.clone(), base_url, Arc::clone(&self.credentials)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::{ErrorCategory, exit_code_from_error};
    use omni_core::MemoryStore;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> AppContext {
        let store = ConfigStore::open(dir.path().join("omni.json")).unwrap();
        AppContext::with_credentials(store, Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn required_url_names_the_missing_key() {
        let dir = TempDir::new().unwrap();
        let err = context(&dir).required_url(keys::JIRA_URL).unwrap_err();
        assert_eq!(exit_code_from_error(&err), ErrorCategory::Config.exit_code());
        assert!(err.to_string().contains(keys::JIRA_URL));
    }

    #[test]
    fn configured_url_overrides_default() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        assert_eq!(
            ctx.url_or(keys::GITHUB_API_URL, github::DEFAULT_API_URL).unwrap(),
            "https://api.github.com"
        );

        ctx.store
            .set_value(keys::GITHUB_API_URL, "https://ghe.example.com/api/v3/")
            .unwrap();
        assert_eq!(
            ctx.url_or(keys::GITHUB_API_URL, github::DEFAULT_API_URL).unwrap(),
            "https://ghe.example.com/api/v3"
        );
    }
}
