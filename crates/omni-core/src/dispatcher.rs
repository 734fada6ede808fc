//! Generic fetch → filter → suppress → render pipeline.

use tracing::{debug, instrument};

use crate::cache::CacheManager;
use crate::handler::Handler;
use crate::types::DisplayRow;
use crate::Result;

/// Runs any [`Handler`] against the shared cache.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    cache: CacheManager,
}

impl Dispatcher {
    pub const fn new(cache: CacheManager) -> Self {
        Self { cache }
    }

    pub const fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Produce the complete, ordered row list for `handler`.
    ///
    /// A blank `query` skips filtering entirely. Rows come out in the order
    /// the filter (or the fetch) produced them, minus suppressed items. Any
    /// failure returns `Err` and no rows at all.
    #[instrument(skip(self, handler), fields(key = %handler.cache_key()))]
    pub async fn run<H: Handler>(&self, handler: &H, query: &str) -> Result<Vec<DisplayRow>> {
        let mut items = self
            .cache
            .get_or_fetch(&handler.cache_key(), handler.ttl(), || handler.fetch())
            .await?;

        if !query.trim().is_empty() {
            items = handler.filter(query, items);
        }

        let rows: Vec<DisplayRow> = items
            .iter()
            .filter(|item| !handler.suppress(item))
            .map(|item| handler.render(item))
            .collect();

        debug!(rows = rows.len(), "dispatch complete");
        Ok(rows)
    }
}
