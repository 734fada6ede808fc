//! # omni-core
//!
//! Dispatch engine behind the `omni` command: query several unrelated
//! services through one uniform pipeline, with read results cached briefly
//! and mutating calls debounced.
//!
//! ## Architecture
//!
//! - **State**: [`ConfigStore`] persists configuration, cache records and
//!   throttle timestamps in one flat JSON file
//! - **Caching**: [`CacheManager`] serves fresh records or refetches stale ones
//! - **Handlers**: each source implements [`Handler`]; the [`Dispatcher`] runs
//!   any handler through fetch, filter, suppression and render
//! - **Side effects**: [`ThrottleGuard`] debounces named actions
//! - **Secrets**: [`CredentialStore`] and its adapters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use omni_core::{CacheManager, ConfigStore, Dispatcher};
//!
//! let store = ConfigStore::open("/tmp/omni.json")?;
//! let dispatcher = Dispatcher::new(CacheManager::new(store));
//! # let _ = dispatcher;
//! # Ok::<(), omni_core::Error>(())
//! ```

/// Relative age strings
pub mod age;
/// Time-bounded cache on top of the state file
pub mod cache;
/// Secret storage adapters
pub mod credentials;
/// Handler pipeline
pub mod dispatcher;
/// Error types and result aliases
pub mod error;
/// Per-source handler trait
pub mod handler;
/// Fuzzy query matching
pub mod matching;
/// Flat JSON state file
pub mod store;
/// Debounce guard for side-effecting actions
pub mod throttle;
/// Rows handed to the host
pub mod types;

pub use age::{age_since, age_string};
pub use cache::{CacheManager, CacheRecord};
pub use credentials::{ChainStore, CredentialStore, EnvStore, KeychainStore, MemoryStore};
pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
pub use handler::Handler;
pub use matching::fuzzy_filter;
pub use store::{ConfigMap, ConfigStore};
pub use throttle::{ThrottleGuard, Throttled};
pub use types::{DisplayRow, Icon};
