//! Debounce guard for side-effecting actions.
//!
//! The guard records when a named action last ran under `called_<action>` in
//! the state file. Before running it waits a short window and checks whether
//! another invocation touched the timestamp in the meantime; if so, it backs
//! off.
//!
//! This is best-effort. The re-read and the write that follows are two
//! separate file operations, so two processes that both re-read before either
//! writes will both run the action. Closing that gap would need an OS file
//! lock.

use std::future::Future;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, info};

use crate::store::ConfigStore;
use crate::Result;

/// Default debounce window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Outcome of a guarded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Throttled<T> {
    /// The action ran and produced this value.
    Ran(T),
    /// Another invocation claimed the action during the debounce window.
    Skipped,
}

impl<T> Throttled<T> {
    /// Whether the action was skipped.
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Rate-limits named actions through timestamps kept in a [`ConfigStore`].
#[derive(Debug, Clone)]
pub struct ThrottleGuard {
    store: ConfigStore,
    debounce: Duration,
}

impl ThrottleGuard {
    /// Guard with the default debounce window.
    pub const fn new(store: ConfigStore) -> Self {
        Self::with_debounce(store, DEFAULT_DEBOUNCE)
    }

    /// Guard with a custom debounce window.
    pub const fn with_debounce(store: ConfigStore, debounce: Duration) -> Self {
        Self { store, debounce }
    }

    /// Run `action` unless a concurrent invocation of `name` wins the race.
    ///
    /// Errors from `action` and from persisting the timestamp are returned as is.
    pub async fn guard<T, F, Fut>(&self, name: &str, action: F) -> Result<Throttled<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let key = timestamp_key(name);
        let before = self.last_called(&key);

        tokio::time::sleep(self.debounce).await;

        let after = self.last_called(&key);
        if before != after {
            info!(action = name, "skipping action; another invocation claimed it");
            return Ok(Throttled::Skipped);
        }

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);
        self.store.set_value(key, now)?;
        debug!(action = name, "running guarded action");

        action().await.map(Throttled::Ran)
    }

    fn last_called(&self, key: &str) -> Option<Value> {
        self.store.load().remove(key)
    }
}

/// State-file key holding the last accepted invocation of `name`.
pub fn timestamp_key(name: &str) -> String {
    format!("called_{name}")
}
