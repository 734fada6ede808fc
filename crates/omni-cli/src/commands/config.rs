//! `omni config`: inspect and edit the state file, and store secrets.

use std::io::BufRead;

use anyhow::{Result, anyhow};
use omni_core::credentials::ALL_KEYS;
use omni_core::{ConfigStore, CredentialStore, KeychainStore};
use secrecy::SecretString;
use serde_json::Value;

use crate::cli::ConfigCommand;
use crate::error::CliError;
use crate::keys;

pub async fn execute(command: &ConfigCommand, store: &ConfigStore) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => set(store, key, value),
        ConfigCommand::Get { key } => get(store, key),
        ConfigCommand::List => {
            for line in list(store) {
                println!("{line}");
            }
            Ok(())
        },
        ConfigCommand::SetSecret { key } => {
            let secret = read_secret(std::io::stdin().lock())?;
            set_secret(&KeychainStore::default(), key, secret).await
        },
    }
}

fn set(store: &ConfigStore, key: &str, value: &str) -> Result<()> {
    if keys::is_internal(key) {
        return Err(CliError::usage(anyhow!("'{key}' is managed by omni and cannot be set")).into());
    }
    if !keys::KNOWN.contains(&key) {
        return Err(CliError::usage(anyhow!(
            "unknown key '{key}' (expected one of: {})",
            keys::KNOWN.join(", ")
        ))
        .into());
    }
    store.set_value(key, value.trim())?;
    eprintln!("Set {key}");
    Ok(())
}

fn get(store: &ConfigStore, key: &str) -> Result<()> {
    match store.get(key, false)? {
        Some(value) => {
            println!("{}", display_value(&value));
            Ok(())
        },
        None => Err(CliError::not_found(anyhow!("no value stored for '{key}'")).into()),
    }
}

/// `key = value` lines for user-visible entries, sorted by key.
fn list(store: &ConfigStore) -> Vec<String> {
    let mut entries: Vec<_> = store
        .load()
        .into_iter()
        .filter(|(key, _)| !keys::is_internal(key))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
        .into_iter()
        .map(|(key, value)| format!("{key} = {}", display_value(&value)))
        .collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// First line of `input`, which must not be blank.
fn read_secret(input: impl BufRead) -> Result<SecretString> {
    let line = input.lines().next().transpose()?.unwrap_or_default();
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(CliError::usage(anyhow!("expected the secret on stdin")).into());
    }
    Ok(SecretString::from(trimmed.to_string()))
}

async fn set_secret(
    credentials: &dyn CredentialStore,
    key: &str,
    secret: SecretString,
) -> Result<()> {
    if !ALL_KEYS.contains(&key) {
        return Err(CliError::usage(anyhow!(
            "unknown credential '{key}' (expected one of: {})",
            ALL_KEYS.join(", ")
        ))
        .into());
    }
    credentials.set(key, secret).await?;
    eprintln!("Stored {key}");
    Ok(())
}
