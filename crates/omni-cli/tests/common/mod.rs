#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Environment variables the credential chain reads.
const CREDENTIAL_VARS: [&str; 9] = [
    "OMNI_OMNIAPI_HACKPAD_CLIENT_ID",
    "OMNI_OMNIAPI_HACKPAD_SECRET",
    "OMNI_OMNIAPI_JIRA_USER",
    "OMNI_OMNIAPI_JIRA_PW",
    "OMNI_OMNIAPI_JIVE_USER",
    "OMNI_OMNIAPI_JIVE_PW",
    "OMNI_OMNIAPI_GITHUB_TOKEN",
    "OMNI_OMNIAPI_TRELLO_API_KEY",
    "OMNI_OMNIAPI_TRELLO_TOKEN",
];

/// A scratch directory holding one state file.
#[allow(dead_code)]
pub struct StateDir {
    dir: TempDir,
}

#[allow(dead_code)]
impl StateDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create state dir for tests"),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("omni.json")
    }

    /// Seed the state file with `json`.
    pub fn write(&self, json: &serde_json::Value) {
        std::fs::write(self.path(), serde_json::to_vec_pretty(json).unwrap()).unwrap();
    }

    pub fn read(&self) -> serde_json::Value {
        serde_json::from_slice(&std::fs::read(self.path()).unwrap()).unwrap()
    }
}

/// Create an `omni` command bound to `state_file`, with Alfred output and
/// no credentials inherited from the parent environment.
#[allow(dead_code)]
pub fn omni_cmd(state_file: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("omni"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("OMNI_STATE_FILE", state_file);
    cmd.env("OMNI_OUTPUT_FORMAT", "alfred");
    cmd.env("NO_COLOR", "1");
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd
}
