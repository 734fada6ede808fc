//! Per-source strategy consumed by the [`Dispatcher`](crate::Dispatcher).

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::matching::fuzzy_filter;
use crate::types::DisplayRow;
use crate::Result;

/// Everything the dispatcher needs to know about one kind of listing.
///
/// Implementations carry their own construction parameters (a repository, a
/// member id) and must derive [`cache_key`](Handler::cache_key) from them so
/// that two handlers for the same resource share a cache record and two
/// handlers for different resources never do.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Source-defined record. Stored verbatim in the cache.
    type Item: Serialize + DeserializeOwned + Send + Sync;

    /// Cache record name, without the `cache_` prefix.
    fn cache_key(&self) -> String;

    /// How long a fetched list stays fresh.
    fn ttl(&self) -> Duration;

    /// Pull the full list from the backend.
    async fn fetch(&self) -> Result<Vec<Self::Item>>;

    /// Text the default filter matches the query against.
    fn match_text(&self, item: &Self::Item) -> String;

    /// Narrow `items` to those matching `query`. Only called with a non-blank query.
    fn filter(&self, query: &str, items: Vec<Self::Item>) -> Vec<Self::Item> {
        fuzzy_filter(query, items, |item| self.match_text(item))
    }

    /// Items for which this returns true are dropped after filtering.
    fn suppress(&self, _item: &Self::Item) -> bool {
        false
    }

    fn render(&self, item: &Self::Item) -> DisplayRow;
}
