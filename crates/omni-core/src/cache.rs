//! Time-bounded cache backed by the state file.
//!
//! Each record lives under `cache_<key>` in the same flat JSON object as the
//! configuration, so a refresh is a full load/merge/rewrite of that file.
//! Records never expire on their own: a stale record stays on disk until the
//! next successful fetch for the same key replaces it.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::store::ConfigStore;
use crate::Result;

/// Prefix applied to cache keys inside the state file.
pub const CACHE_KEY_PREFIX: &str = "cache_";

/// A cached payload together with the time it was fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord<T> {
    /// When the payload was fetched.
    pub fetched_at: DateTime<Utc>,
    /// The handler's fetch result.
    pub data: T,
}

impl<T> CacheRecord<T> {
    /// Wrap `data` with the current timestamp.
    pub fn new(data: T) -> Self {
        Self {
            fetched_at: Utc::now(),
            data,
        }
    }

    /// Time since the record was fetched. Records from the future count as age zero.
    pub fn age(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.fetched_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// A record is fresh while its age is strictly below `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

/// Serves cached payloads and refetches them once they go stale.
#[derive(Debug, Clone)]
pub struct CacheManager {
    store: ConfigStore,
}

impl CacheManager {
    /// Cache records are written to `store`.
    pub const fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// Return the payload for `key`, calling `fetch` at most once.
    ///
    /// A fresh record is returned without invoking `fetch`. An absent, stale
    /// or unreadable record triggers exactly one `fetch`; its result is stored
    /// with the current timestamp and returned. A fetch error is returned
    /// unchanged and the previous record stays as it was.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(record) = self.lookup::<T>(key) {
            if record.is_fresh(ttl) {
                debug!(key, age_secs = record.age().as_secs(), "cache hit");
                return Ok(record.data);
            }
            debug!(key, age_secs = record.age().as_secs(), "cache stale");
        } else {
            debug!(key, "cache miss");
        }

        let data = fetch().await?;
        self.store_record(key, &CacheRecord::new(&data))?;
        Ok(data)
    }

    /// Read the record for `key` if one exists and matches `T`.
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<CacheRecord<T>> {
        let raw = self.store.load().remove(&record_key(key))?;
        match serde_json::from_value::<CacheRecord<T>>(raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(key, "ignoring unreadable cache record: {err}");
                None
            },
        }
    }

    fn store_record<T: Serialize>(&self, key: &str, record: &CacheRecord<T>) -> Result<()> {
        let value: Value = serde_json::to_value(record)?;
        self.store.set_value(record_key(key), value)
    }
}

fn record_key(key: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{key}")
}
