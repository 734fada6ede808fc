//! Secret lookup for backend credentials.
//!
//! Secrets are handed out as [`SecretString`] and are never written to the
//! state file. The CLI chains an [`EnvStore`] in front of a [`KeychainStore`]
//! so CI and non-macOS hosts can supply credentials through the environment.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::{Error, Result};

pub const HACKPAD_CLIENT_ID: &str = "omniapi_hackpad_client_id";
pub const HACKPAD_SECRET: &str = "omniapi_hackpad_secret";
pub const JIRA_USERNAME: &str = "omniapi_jira_user";
pub const JIRA_PASSWORD: &str = "omniapi_jira_pw";
pub const JIVE_USERNAME: &str = "omniapi_jive_user";
pub const JIVE_PASSWORD: &str = "omniapi_jive_pw";
pub const GITHUB_TOKEN: &str = "omniapi_github_token";
pub const TRELLO_API_KEY: &str = "omniapi_trello_api_key";
pub const TRELLO_TOKEN: &str = "omniapi_trello_token";

/// Every credential identifier the backends use.
pub const ALL_KEYS: [&str; 9] = [
    HACKPAD_CLIENT_ID,
    HACKPAD_SECRET,
    JIRA_USERNAME,
    JIRA_PASSWORD,
    JIVE_USERNAME,
    JIVE_PASSWORD,
    GITHUB_TOKEN,
    TRELLO_API_KEY,
    TRELLO_TOKEN,
];

/// Named secret storage.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fails with [`Error::CredentialNotFound`] when `key` has no secret.
    async fn get(&self, key: &str) -> Result<SecretString>;

    async fn set(&self, key: &str, secret: SecretString) -> Result<()>;
}

/// macOS login keychain, driven through the `security` tool.
#[derive(Debug, Clone)]
pub struct KeychainStore {
    service: String,
}

/// `security` exits with this status when no matching item exists.
const SECURITY_ITEM_NOT_FOUND: i32 = 44;

impl KeychainStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new("omni")
    }
}

#[async_trait]
impl CredentialStore for KeychainStore {
    async fn get(&self, key: &str) -> Result<SecretString> {
        use tokio::process::Command;

        let output = match Command::new("security")
            .args(["find-generic-password", "-s", self.service.as_str(), "-a", key, "-w"])
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("security tool not available");
                return Err(not_found(key));
            },
            Err(e) => return Err(Error::Credential(format!("failed to run security: {e}"))),
        };

        if output.status.code() == Some(SECURITY_ITEM_NOT_FOUND) {
            return Err(not_found(key));
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::Credential(format!("keychain lookup for {key} failed: {stderr}")));
        }

        let secret = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        if secret.is_empty() {
            return Err(not_found(key));
        }
        Ok(SecretString::from(secret))
    }

    /// Stores `secret` with `add-generic-password -U`.
    ///
    /// `security` only takes a non-interactive password as its `-w` argument,
    /// so the secret is visible in the process table for as long as the tool
    /// runs.
    async fn set(&self, key: &str, secret: SecretString) -> Result<()> {
        use tokio::process::Command;

        let status = Command::new("security")
            .args(["add-generic-password", "-U", "-s", self.service.as_str(), "-a", key, "-w"])
            .arg(secret.expose_secret())
            .status()
            .await
            .map_err(|e| Error::Credential(format!("failed to run security: {e}")))?;

        if !status.success() {
            return Err(Error::Credential(format!(
                "keychain update for {key} exited with {status}"
            )));
        }
        Ok(())
    }
}

/// Reads secrets from `<PREFIX><KEY>` environment variables, key uppercased.
#[derive(Debug, Clone)]
pub struct EnvStore {
    prefix: String,
}

impl EnvStore {
    pub fn new() -> Self {
        Self::with_prefix("OMNI_")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_uppercase())
    }
}

impl Default for EnvStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for EnvStore {
    async fn get(&self, key: &str) -> Result<SecretString> {
        match std::env::var(self.var_name(key)) {
            Ok(value) if !value.is_empty() => Ok(SecretString::from(value)),
            _ => Err(not_found(key)),
        }
    }

    async fn set(&self, key: &str, _secret: SecretString) -> Result<()> {
        Err(Error::Credential(format!(
            "environment credentials are read-only; export {} instead",
            self.var_name(key)
        )))
    }
}

/// Tries each store in turn. Writes go to the first store.
pub struct ChainStore {
    stores: Vec<Box<dyn CredentialStore>>,
}

impl ChainStore {
    pub fn new(stores: Vec<Box<dyn CredentialStore>>) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl CredentialStore for ChainStore {
    async fn get(&self, key: &str) -> Result<SecretString> {
        for store in &self.stores {
            match store.get(key).await {
                Ok(secret) => return Ok(secret),
                Err(Error::CredentialNotFound { .. }) => {},
                Err(e) => return Err(e),
            }
        }
        Err(not_found(key))
    }

    async fn set(&self, key: &str, secret: SecretString) -> Result<()> {
        match self.stores.first() {
            Some(store) => store.set(key, secret).await,
            None => Err(Error::Credential("no credential store configured".to_string())),
        }
    }
}

/// In-process store, mostly for tests.
#[derive(Default)]
pub struct MemoryStore {
    secrets: Mutex<HashMap<String, SecretString>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, secret: &str) -> Self {
        if let Ok(mut secrets) = self.secrets.lock() {
            secrets.insert(key.to_string(), SecretString::from(secret.to_string()));
        }
        self
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<SecretString> {
        let secrets = self
            .secrets
            .lock()
            .map_err(|_| Error::Credential("credential map poisoned".to_string()))?;
        secrets
            .get(key)
            .map(|secret| SecretString::from(secret.expose_secret().to_string()))
            .ok_or_else(|| not_found(key))
    }

    async fn set(&self, key: &str, secret: SecretString) -> Result<()> {
        let mut secrets = self
            .secrets
            .lock()
            .map_err(|_| Error::Credential("credential map poisoned".to_string()))?;
        secrets.insert(key.to_string(), secret);
        Ok(())
    }
}

fn not_found(key: &str) -> Error {
    Error::CredentialNotFound {
        key: key.to_string(),
    }
}
