//! Flat JSON key/value persistence for configuration, cache records and
//! throttle timestamps.
//!
//! The whole file is read on every access and rewritten on every mutation.
//! There is no locking: two processes writing at the same moment race and the
//! last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{Error, Result};

/// In-memory view of the state file.
pub type ConfigMap = Map<String, Value>;

/// Handle to the state file.
///
/// Cheap to clone; construct one per process and pass it to every component
/// that needs persisted state.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a handle without touching the file system.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a handle and make sure a readable file exists at `path`.
    ///
    /// A missing or unparseable file is (re)initialized to an empty object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        if !store.path.exists() {
            debug!(path = %store.path.display(), "initializing state file");
            store.write(&ConfigMap::new())?;
        } else {
            // heals a corrupt file as a side effect
            store.try_load()?;
        }
        Ok(store)
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full mapping.
    ///
    /// Never fails: an absent file yields an empty mapping, a corrupt one is
    /// reset to `{}`, and any other read error is logged and reads as empty.
    /// Writers go through [`ConfigStore::try_load`] instead.
    pub fn load(&self) -> ConfigMap {
        self.try_load().unwrap_or_else(|err| {
            warn!("failed to read state file at {}: {err}", self.path.display());
            ConfigMap::new()
        })
    }

    /// Read the full mapping, failing only when the file exists but cannot be read.
    ///
    /// Absent and unparseable files behave as in [`ConfigStore::load`].
    pub fn try_load(&self) -> Result<ConfigMap> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigMap::new()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => {
                warn!(
                    "state file at {} holds a JSON {} instead of an object; resetting",
                    self.path.display(),
                    json_kind(&other)
                );
                self.reinitialize();
                Ok(ConfigMap::new())
            },
            Err(err) => {
                warn!("failed to parse state file at {}: {err}; resetting", self.path.display());
                self.reinitialize();
                Ok(ConfigMap::new())
            },
        }
    }

    /// Merge `updates` into the stored mapping and rewrite the file.
    ///
    /// Keys in `updates` overwrite existing keys; all other keys are kept.
    /// A file that exists but cannot be read is left alone and the error
    /// returned, so stored keys are never dropped.
    pub fn set(&self, updates: ConfigMap) -> Result<()> {
        let mut data = self.try_load()?;
        data.extend(updates);
        self.write(&data)
    }

    /// Convenience wrapper around [`ConfigStore::set`] for a single key.
    pub fn set_value(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let mut updates = ConfigMap::new();
        updates.insert(key.into(), value.into());
        self.set(updates)
    }

    /// Look up `key`.
    ///
    /// With `enforce`, an absent or falsy value (`null`, `""`, `0`, `false`,
    /// empty array/object) fails with [`Error::MissingConfiguration`].
    /// Without it, absent values come back as `None` and falsy values are
    /// returned as stored.
    pub fn get(&self, key: &str, enforce: bool) -> Result<Option<Value>> {
        let value = self.load().remove(key);
        if enforce && value.as_ref().is_none_or(is_falsy) {
            return Err(Error::MissingConfiguration {
                key: key.to_string(),
            });
        }
        Ok(value)
    }

    /// Required scalar value rendered as a string.
    pub fn get_str(&self, key: &str) -> Result<String> {
        self.get(key, true)?
            .as_ref()
            .and_then(scalar_to_string)
            .ok_or_else(|| Error::MissingConfiguration {
                key: key.to_string(),
            })
    }

    /// Optional scalar value rendered as a string; empty values count as absent.
    pub fn get_str_optional(&self, key: &str) -> Option<String> {
        self.load()
            .get(key)
            .filter(|value| !is_falsy(value))
            .and_then(scalar_to_string)
    }

    fn reinitialize(&self) {
        if let Err(err) = self.write(&ConfigMap::new()) {
            warn!("failed to reinitialize state file at {}: {err}", self.path.display());
        }
    }

    fn write(&self, data: &ConfigMap) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(data)?;

        // Write to a sibling file and rename so readers never see a torn write
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
